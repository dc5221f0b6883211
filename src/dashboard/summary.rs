//! Totals for a single day.

use time::Date;

use crate::transaction::Transaction;

/// Money in, money out and the net amount for one calendar day.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DailySummary {
    /// The sum of the positive amounts.
    pub money_in: f64,
    /// The sum of the negative amounts, kept negative.
    pub money_out: f64,
    /// The sum of all amounts.
    pub net: f64,
}

impl DailySummary {
    /// Summarize the transactions that happened on `today`.
    pub fn for_day(transactions: &[Transaction], today: Date) -> Self {
        transactions
            .iter()
            .filter(|transaction| transaction.date.date() == today)
            .fold(Self::default(), |mut summary, transaction| {
                if transaction.amount > 0.0 {
                    summary.money_in += transaction.amount;
                } else {
                    summary.money_out += transaction.amount;
                }
                summary.net += transaction.amount;
                summary
            })
    }
}

/// The `limit` newest transactions, newest first.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut recent: Vec<&Transaction> = transactions.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(limit);

    recent
}
