//! JSON endpoints for listing stored transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    transaction::{Transaction, get_recent_transactions, get_transactions},
};

/// The number of transactions returned by the recent transactions endpoint.
pub const RECENT_TRANSACTION_LIMIT: u32 = 20;

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Route handler that returns every stored transaction, newest first.
pub async fn get_transactions_endpoint(State(state): State<TransactionsState>) -> Response {
    query_transactions(&state, get_transactions)
}

/// Route handler that returns the most recent transactions, newest first.
pub async fn get_recent_transactions_endpoint(State(state): State<TransactionsState>) -> Response {
    query_transactions(&state, |connection| {
        get_recent_transactions(RECENT_TRANSACTION_LIMIT, connection)
    })
}

fn query_transactions(
    state: &TransactionsState,
    query: impl FnOnce(&Connection) -> Result<Vec<Transaction>, Error>,
) -> Response {
    let result = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| query(&connection));

    match result {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("Could not list transactions: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Could not list transactions" })),
            )
                .into_response()
        }
    }
}
