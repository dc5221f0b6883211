//! Transactions as they arrive from outside the app.

use serde::Deserialize;

use crate::{
    Error,
    transaction::{Transaction, TransactionId, parse_timestamp},
};

/// A transaction as sent by the transaction source or written in an export.
///
/// Text fields may be `null` or missing, and the date may carry a UTC offset.
/// Unknown fields, such as the export's `user_id` and `wallet_id`, are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionRecord {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Where the money was spent or where it came from.
    #[serde(default)]
    pub merchant: Option<String>,
    /// The category of the transaction.
    #[serde(default)]
    pub category: Option<String>,
    /// The signed amount, negative for money out.
    pub amount: f64,
    /// Where the transaction took place.
    #[serde(default)]
    pub location: Option<String>,
    /// When the transaction happened, as written by the sender.
    pub date: String,
}

impl TransactionRecord {
    /// Convert the record to a [Transaction] with its date in `canonical_timezone`.
    ///
    /// Missing text becomes an empty string and an empty category becomes no category.
    ///
    /// # Errors
    /// Returns the error from [parse_timestamp] if the date cannot be read.
    pub fn into_transaction(self, canonical_timezone: &str) -> Result<Transaction, Error> {
        let date = parse_timestamp(&self.date, canonical_timezone)?;

        Ok(Transaction {
            id: self.id,
            merchant: self.merchant.unwrap_or_default(),
            category: self.category.filter(|category| !category.is_empty()),
            amount: self.amount,
            location: self.location.unwrap_or_default(),
            date,
        })
    }
}
