//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    analysis::{SummaryClient, TransactionSource},
    db::initialize,
};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Shanghai".
    pub local_timezone: String,

    /// Where the pages load the user's transactions from.
    pub transaction_source: TransactionSource,

    /// The client for the summary service, if one has been configured.
    pub summary_client: Option<SummaryClient>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the transaction table.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Shanghai".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        transaction_source: TransactionSource,
        summary_client: Option<SummaryClient>,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            local_timezone: local_timezone.to_owned(),
            transaction_source,
            summary_client,
        })
    }
}
