//! The set of transactions the user has picked.

use std::collections::BTreeSet;

use crate::transaction::{Transaction, TransactionId};

/// The IDs of the transactions the user has selected.
///
/// The selection is kept separate from the filters: an ID stays selected
/// while its transaction is hidden by a filter and counts as selected again
/// once the transaction is visible.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<TransactionId>,
}

impl Selection {
    /// Whether `id` is in the selection.
    pub fn contains(&self, id: TransactionId) -> bool {
        self.ids.contains(&id)
    }

    /// Whether nothing is selected, including hidden transactions.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The selected IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TransactionId> + '_ {
        self.ids.iter().copied()
    }

    /// Add `id` if it is not selected, otherwise remove it.
    pub fn toggle(&mut self, id: TransactionId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Whether every visible transaction is selected.
    ///
    /// Always false when nothing is visible.
    pub fn all_selected(&self, visible: &[&Transaction]) -> bool {
        !visible.is_empty()
            && visible
                .iter()
                .all(|transaction| self.contains(transaction.id))
    }

    /// Select every visible transaction, or deselect them all if they are already selected.
    ///
    /// Selected transactions that are not visible are left alone.
    pub fn toggle_all(&mut self, visible: &[&Transaction]) {
        if self.all_selected(visible) {
            for transaction in visible {
                self.ids.remove(&transaction.id);
            }
        } else {
            self.ids
                .extend(visible.iter().map(|transaction| transaction.id));
        }
    }

    /// The visible transactions that are selected, in the order they are visible.
    pub fn selected<'a>(&self, visible: &[&'a Transaction]) -> Vec<&'a Transaction> {
        visible
            .iter()
            .copied()
            .filter(|transaction| self.contains(transaction.id))
            .collect()
    }

    /// A copy of the selection with `id` toggled.
    pub fn toggled(&self, id: TransactionId) -> Self {
        let mut selection = self.clone();
        selection.toggle(id);
        selection
    }

    /// A copy of the selection with the visible transactions toggled as a group.
    pub fn toggled_all(&self, visible: &[&Transaction]) -> Self {
        let mut selection = self.clone();
        selection.toggle_all(visible);
        selection
    }
}

impl FromIterator<TransactionId> for Selection {
    fn from_iter<T: IntoIterator<Item = TransactionId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::{PrimitiveDateTime, macros::datetime};

    use crate::{
        analysis::{CategoryFilter, Period, visible_transactions},
        transaction::{Transaction, TransactionId},
    };

    use super::Selection;

    const NOW: PrimitiveDateTime = datetime!(2024-06-15 12:00:00);

    fn create_test_transaction(id: TransactionId, category: &str) -> Transaction {
        Transaction::build(id, -1.0, NOW, "Merchant")
            .category(category)
            .finalise()
    }

    fn ids(transactions: &[&Transaction]) -> Vec<TransactionId> {
        transactions.iter().map(|transaction| transaction.id).collect()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = Selection::default();

        selection.toggle(5);
        assert!(selection.contains(5));

        selection.toggle(5);
        assert!(selection.is_empty());
    }

    #[test]
    fn selection_survives_filter_changes() {
        let transactions = vec![
            create_test_transaction(5, "Food"),
            create_test_transaction(6, "Books"),
        ];
        let mut selection = Selection::default();

        let all = visible_transactions(&transactions, Period::Year, &CategoryFilter::All, NOW);
        selection.toggle(5);
        assert_eq!(ids(&selection.selected(&all)), vec![5]);

        let books = visible_transactions(
            &transactions,
            Period::Year,
            &CategoryFilter::parse("Books"),
            NOW,
        );
        assert!(selection.selected(&books).is_empty());

        let all = visible_transactions(&transactions, Period::Year, &CategoryFilter::All, NOW);
        assert_eq!(ids(&selection.selected(&all)), vec![5]);
    }

    #[test]
    fn bulk_toggle_selects_then_clears_visible() {
        let transactions = vec![
            create_test_transaction(1, "Food"),
            create_test_transaction(2, "Food"),
            create_test_transaction(3, "Books"),
        ];
        let visible: Vec<&Transaction> = transactions.iter().collect();
        let mut selection = Selection::default();
        selection.toggle(2);

        selection.toggle_all(&visible);
        assert_eq!(selection.selected(&visible), visible);

        selection.toggle_all(&visible);
        assert!(selection.selected(&visible).is_empty());
    }

    #[test]
    fn bulk_toggle_keeps_hidden_selections() {
        let transactions = vec![
            create_test_transaction(1, "Food"),
            create_test_transaction(2, "Books"),
        ];
        let food = visible_transactions(
            &transactions,
            Period::Year,
            &CategoryFilter::parse("Food"),
            NOW,
        );
        let mut selection: Selection = [2].into_iter().collect();

        selection.toggle_all(&food);
        selection.toggle_all(&food);

        assert_eq!(selection.ids().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn bulk_toggle_with_nothing_visible_does_nothing() {
        let mut selection: Selection = [7].into_iter().collect();

        selection.toggle_all(&[]);

        assert!(!selection.all_selected(&[]));
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn selected_follows_visible_order() {
        let transactions = vec![
            create_test_transaction(9, "Food"),
            create_test_transaction(3, "Food"),
        ];
        let visible: Vec<&Transaction> = transactions.iter().collect();
        let selection: Selection = [3, 9].into_iter().collect();

        assert_eq!(ids(&selection.selected(&visible)), vec![9, 3]);
    }
}
