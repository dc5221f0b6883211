//! Filtering transactions by category and by period.

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{analysis::Period, transaction::Transaction};

/// Restricts the transactions shown to a single category.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// Every transaction passes.
    #[default]
    All,
    /// Only transactions whose category is exactly this string pass.
    Exact(String),
}

impl CategoryFilter {
    /// The query value that selects every category.
    pub const ALL_VALUE: &'static str = "all";

    /// Interpret a query value, where `"all"` means no filtering.
    pub fn parse(value: &str) -> Self {
        Self::from(value.to_owned())
    }

    /// Whether `transaction` passes the filter.
    ///
    /// Categories are compared as stored, so the comparison is case-sensitive
    /// and a missing category only matches [CategoryFilter::All].
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(category) => {
                transaction.category.as_deref() == Some(category.as_str())
            }
        }
    }

    /// The value used for this filter in URL queries.
    pub fn as_query_value(&self) -> &str {
        match self {
            CategoryFilter::All => Self::ALL_VALUE,
            CategoryFilter::Exact(category) => category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == Self::ALL_VALUE {
            CategoryFilter::All
        } else {
            CategoryFilter::Exact(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => CategoryFilter::ALL_VALUE.to_owned(),
            CategoryFilter::Exact(category) => category,
        }
    }
}

/// The transactions that pass both the period and the category filter, in source order.
pub fn visible_transactions<'a>(
    transactions: &'a [Transaction],
    period: Period,
    category: &CategoryFilter,
    now: PrimitiveDateTime,
) -> Vec<&'a Transaction> {
    let boundary = period.boundary(now);

    transactions
        .iter()
        .filter(|transaction| transaction.date >= boundary && category.matches(transaction))
        .collect()
}

/// The distinct non-empty categories of `transactions`, sorted alphabetically.
pub fn categories(transactions: &[Transaction]) -> Vec<&str> {
    let mut categories: Vec<&str> = transactions
        .iter()
        .filter_map(|transaction| transaction.category.as_deref())
        .filter(|category| !category.is_empty())
        .collect();
    categories.sort_unstable();
    categories.dedup();

    categories
}

#[cfg(test)]
mod tests {
    use time::{PrimitiveDateTime, macros::datetime};

    use crate::{
        analysis::{CategoryFilter, Period},
        transaction::{Transaction, TransactionId},
    };

    use super::{categories, visible_transactions};

    const NOW: PrimitiveDateTime = datetime!(2024-06-15 12:00:00);

    fn create_test_transaction(
        id: TransactionId,
        category: &str,
        date: PrimitiveDateTime,
    ) -> Transaction {
        Transaction::build(id, -1.0, date, "Merchant")
            .category(category)
            .finalise()
    }

    fn ids(transactions: &[&Transaction]) -> Vec<TransactionId> {
        transactions.iter().map(|transaction| transaction.id).collect()
    }

    #[test]
    fn category_filter_is_exact_match() {
        let food = create_test_transaction(1, "Food", NOW);

        assert!(!CategoryFilter::parse("food").matches(&food));
        assert!(CategoryFilter::parse("Food").matches(&food));
        assert!(CategoryFilter::parse("all").matches(&food));
    }

    #[test]
    fn uncategorized_only_matches_all() {
        let uncategorized = Transaction::build(1, -1.0, NOW, "Merchant").finalise();

        assert!(CategoryFilter::All.matches(&uncategorized));
        assert!(!CategoryFilter::parse("Other").matches(&uncategorized));
    }

    #[test]
    fn visible_applies_both_filters_and_keeps_source_order() {
        let transactions = vec![
            create_test_transaction(3, "Food", datetime!(2024-06-01 08:00:00)),
            create_test_transaction(1, "Books", datetime!(2024-06-02 08:00:00)),
            create_test_transaction(2, "Food", datetime!(2024-01-01 08:00:00)),
            create_test_transaction(4, "Food", datetime!(2024-06-10 08:00:00)),
        ];

        let visible = visible_transactions(
            &transactions,
            Period::Month,
            &CategoryFilter::parse("Food"),
            NOW,
        );

        assert_eq!(ids(&visible), vec![3, 4]);
    }

    #[test]
    fn shorter_periods_show_subsets() {
        let transactions: Vec<_> = (0..24)
            .map(|weeks_ago| {
                create_test_transaction(
                    weeks_ago,
                    "Food",
                    NOW - time::Duration::weeks(weeks_ago * 3),
                )
            })
            .collect();

        let visible_in = |period| {
            ids(&visible_transactions(
                &transactions,
                period,
                &CategoryFilter::All,
                NOW,
            ))
        };
        let month = visible_in(Period::Month);
        let semester = visible_in(Period::Semester);
        let year = visible_in(Period::Year);

        assert!(month.iter().all(|id| semester.contains(id)));
        assert!(semester.iter().all(|id| year.contains(id)));
        assert!(month.len() < semester.len() && semester.len() < year.len());
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        let transactions = vec![
            create_test_transaction(1, "Food", NOW),
            create_test_transaction(2, "Books", NOW),
            create_test_transaction(3, "Food", NOW),
            create_test_transaction(4, "", NOW),
            Transaction::build(5, -1.0, NOW, "Merchant").finalise(),
        ];

        assert_eq!(categories(&transactions), vec!["Books", "Food"]);
    }
}
