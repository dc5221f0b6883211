//! The account dashboard: today's totals and the latest transactions.

mod handlers;
mod summary;

pub use handlers::get_dashboard_page;
pub use summary::{DailySummary, recent_transactions};
