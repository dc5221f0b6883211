//! The URL query that carries the view parameters between requests.
//!
//! The filters and the selection live in the query string, so links to
//! toggle a transaction or change a filter carry the rest of the state with
//! them.

use serde::Deserialize;

use crate::{
    analysis::{CategoryFilter, Period, Selection, ViewParameters},
    transaction::TransactionId,
};

/// The query parameters and form fields accepted by the analysis routes.
///
/// `selected` may be repeated, once per selected transaction.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct AnalysisQuery {
    /// How far back to show transactions.
    #[serde(default)]
    pub period: Period,
    /// Which category to show, `"all"` for every category.
    #[serde(default)]
    pub category: CategoryFilter,
    /// The IDs of the selected transactions.
    #[serde(default)]
    pub selected: Vec<TransactionId>,
}

impl From<AnalysisQuery> for ViewParameters {
    fn from(query: AnalysisQuery) -> Self {
        Self {
            period: query.period,
            category: query.category,
            selection: query.selected.into_iter().collect(),
        }
    }
}

impl ViewParameters {
    /// The same parameters with a different period.
    pub fn with_period(&self, period: Period) -> Self {
        Self {
            period,
            ..self.clone()
        }
    }

    /// The same parameters with a different category filter.
    pub fn with_category(&self, category: CategoryFilter) -> Self {
        Self {
            category,
            ..self.clone()
        }
    }

    /// The same parameters with a different selection.
    pub fn with_selection(&self, selection: Selection) -> Self {
        Self {
            selection,
            ..self.clone()
        }
    }

    /// The parameters as `(name, value)` pairs in the order they appear in URLs.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("period", self.period.as_query_value().to_owned()),
            ("category", self.category.as_query_value().to_owned()),
        ];
        pairs.extend(self.selection.ids().map(|id| ("selected", id.to_string())));

        pairs
    }
}

/// Build a URL for `endpoint` that carries `parameters`.
///
/// Falls back to the bare endpoint if the query cannot be encoded.
pub fn analysis_url(endpoint: &str, parameters: &ViewParameters) -> String {
    match serde_urlencoded::to_string(parameters.query_pairs()) {
        Ok(query) => format!("{endpoint}?{query}"),
        Err(error) => {
            tracing::error!("Could not encode analysis query {parameters:?}: {error}");
            endpoint.to_owned()
        }
    }
}
