//! Totals per category and per day for the charts.

use std::collections::{BTreeMap, HashMap};

use time::Date;

use crate::transaction::Transaction;

/// The magnitude of the net amount for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category, "Other" for transactions without one.
    pub category: String,
    /// The absolute value of the summed amounts.
    pub magnitude: f64,
}

/// The net amount for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    /// The calendar day in local time.
    pub day: Date,
    /// The signed sum of the amounts on this day.
    pub net: f64,
}

impl DailyTotal {
    /// The day as `YYYY-MM-DD`.
    pub fn day_label(&self) -> String {
        self.day.to_string()
    }
}

/// The transactions the charts are computed over: the selected transactions
/// if any are selected, otherwise the visible ones.
pub fn aggregate_source<'a, 'b>(
    selected: &'b [&'a Transaction],
    visible: &'b [&'a Transaction],
) -> &'b [&'a Transaction] {
    if selected.is_empty() {
        visible
    } else {
        selected
    }
}

/// Sum the amounts per category.
///
/// Categories are listed in the order they first appear in `source`.
pub fn category_totals(source: &[&Transaction]) -> Vec<CategoryTotal> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, f64)> = Vec::new();

    for transaction in source {
        let category = transaction.category_label();

        match positions.get(category) {
            Some(&position) => sums[position].1 += transaction.amount,
            None => {
                positions.insert(category, sums.len());
                sums.push((category, transaction.amount));
            }
        }
    }

    sums.into_iter()
        .map(|(category, sum)| CategoryTotal {
            category: category.to_owned(),
            magnitude: sum.abs(),
        })
        .collect()
}

/// Sum the signed amounts per calendar day, earliest day first.
pub fn daily_totals(source: &[&Transaction]) -> Vec<DailyTotal> {
    let mut sums: BTreeMap<Date, f64> = BTreeMap::new();

    for transaction in source {
        *sums.entry(transaction.date.date()).or_default() += transaction.amount;
    }

    sums.into_iter()
        .map(|(day, net)| DailyTotal { day, net })
        .collect()
}
