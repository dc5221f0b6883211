//! Ties the filters, the selection and the aggregates together for one render.

use time::PrimitiveDateTime;

use crate::{
    Error,
    analysis::{
        CategoryFilter, CategoryTotal, DailyTotal, Period, Selection, aggregate_source,
        category_totals, daily_totals, visible_transactions,
    },
    transaction::Transaction,
};

/// The choices the user has made on the balance analysis page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewParameters {
    /// How far back to show transactions.
    pub period: Period,
    /// Which category to show.
    pub category: CategoryFilter,
    /// The transactions the user has picked, including hidden ones.
    pub selection: Selection,
}

/// The visible and selected transactions for a set of [ViewParameters].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionView<'a> {
    visible: Vec<&'a Transaction>,
    selected: Vec<&'a Transaction>,
}

impl<'a> TransactionView<'a> {
    /// Apply `parameters` to `transactions` with the period windows ending at `now`.
    pub fn new(
        transactions: &'a [Transaction],
        parameters: &ViewParameters,
        now: PrimitiveDateTime,
    ) -> Self {
        let visible =
            visible_transactions(transactions, parameters.period, &parameters.category, now);
        let selected = parameters.selection.selected(&visible);

        Self { visible, selected }
    }

    /// The transactions passing both filters, in source order.
    pub fn visible(&self) -> &[&'a Transaction] {
        &self.visible
    }

    /// The visible transactions that are selected.
    pub fn selected(&self) -> &[&'a Transaction] {
        &self.selected
    }

    /// The transactions the aggregates are computed over.
    pub fn aggregate_source(&self) -> &[&'a Transaction] {
        aggregate_source(&self.selected, &self.visible)
    }

    /// The category breakdown of [TransactionView::aggregate_source].
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        category_totals(self.aggregate_source())
    }

    /// The daily net amounts of [TransactionView::aggregate_source].
    pub fn daily_totals(&self) -> Vec<DailyTotal> {
        daily_totals(self.aggregate_source())
    }
}

/// The state of the transaction list backing the balance analysis page.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionLoad {
    /// The transactions have been requested but have not arrived yet.
    Pending,
    /// The transactions could not be loaded. Holds the message to show the user.
    Failed(String),
    /// The transactions have been loaded.
    Loaded(Vec<Transaction>),
}

impl TransactionLoad {
    /// The state after a fetch has finished.
    pub fn from_result(result: Result<Vec<Transaction>, Error>) -> Self {
        match result {
            Ok(transactions) => TransactionLoad::Loaded(transactions),
            Err(error) => {
                tracing::warn!("Could not load transactions: {error}");
                TransactionLoad::Failed(error.to_string())
            }
        }
    }

    /// The view of the loaded transactions.
    ///
    /// Pending and failed loads have nothing visible, nothing selected and
    /// empty aggregates.
    pub fn view(&self, parameters: &ViewParameters, now: PrimitiveDateTime) -> TransactionView<'_> {
        match self {
            TransactionLoad::Loaded(transactions) => {
                TransactionView::new(transactions, parameters, now)
            }
            TransactionLoad::Pending | TransactionLoad::Failed(_) => TransactionView::default(),
        }
    }
}
