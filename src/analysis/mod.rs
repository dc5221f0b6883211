//! Balance analysis: filtering, selecting and aggregating transactions.
//!
//! The pure logic lives in:
//! - `period` and `filter` for deciding which transactions are visible
//! - `selection` for the set of transactions the user has picked
//! - `aggregation` and `view_model` for the chart data over one render
//!
//! The rest wires that logic to the page, the CSV export and the
//! collaborators that provide transactions and summaries.

mod aggregation;
mod charts;
mod export;
mod filter;
mod handlers;
mod period;
mod query;
mod selection;
mod source;
mod summary;
mod view_model;
mod views;

pub use aggregation::{
    CategoryTotal, DailyTotal, aggregate_source, category_totals, daily_totals,
};
pub use export::{EXPORT_HEADER, export_csv};
pub use filter::{CategoryFilter, categories, visible_transactions};
pub use handlers::{
    AnalysisState, export_transactions, get_analysis_content, get_analysis_page,
    summarize_transactions,
};
pub use period::Period;
pub use query::{AnalysisQuery, analysis_url};
pub use selection::Selection;
pub use source::{TransactionSource, ensure_unique_ids};
pub use summary::SummaryClient;
pub use view_model::{TransactionLoad, TransactionView, ViewParameters};
