//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The account overview page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The balance analysis page with the transaction list and charts.
pub const ANALYSIS_VIEW: &str = "/analysis";
/// The body of the balance analysis page, loaded after the page shell.
pub const ANALYSIS_CONTENT: &str = "/analysis/content";
/// The route for downloading the selected transactions as CSV.
pub const ANALYSIS_EXPORT: &str = "/analysis/export";
/// The student services directory.
pub const SERVICES_VIEW: &str = "/services";
/// The campus events showcase.
pub const EVENTS_VIEW: &str = "/events";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for requesting a summary of the selected transactions.
pub const ANALYSIS_SUMMARY: &str = "/api/analysis/summary";
/// The route to access all transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to access the most recent transactions.
pub const RECENT_TRANSACTIONS_API: &str = "/api/transactions/recent";
/// The route for checking that the server is up.
pub const HEALTH: &str = "/api/health";
