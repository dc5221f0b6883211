//! Campus Card is a web app for students to keep an eye on their campus card wallet.
//!
//! This library provides a REST API for transactions and server-rendered HTML
//! pages for the account dashboard, the balance analysis view, the student
//! services directory and the campus events.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod analysis;
mod app_state;
mod dashboard;
mod directory;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use analysis::{
    AnalysisQuery, CategoryFilter, CategoryTotal, DailyTotal, EXPORT_HEADER, Period, Selection,
    SummaryClient, TransactionLoad, TransactionSource, TransactionView, ViewParameters,
    aggregate_source, category_totals, daily_totals, ensure_unique_ids, export_csv,
    visible_transactions,
};
pub use app_state::AppState;
pub use dashboard::{DailySummary, recent_transactions};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    ImportSummary, Transaction, TransactionBuilder, TransactionId, TransactionRecord,
    count_transactions, drop_transaction_table, format_timestamp, get_transactions,
    import_transactions_csv, parse_timestamp, upsert_transaction,
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A transaction date could not be parsed as a date and time.
    #[error("could not parse \"{0}\" as a date and time")]
    InvalidTimestamp(String),

    /// Two transactions in the same batch share an ID.
    ///
    /// IDs are used to track which transactions are selected, so a batch with
    /// duplicate IDs is rejected as a whole.
    #[error("the transaction ID {0} appears more than once")]
    DuplicateTransactionId(TransactionId),

    /// The list of transactions could not be fetched from the transaction source.
    ///
    /// The message is shown to the user as is.
    #[error("{0}")]
    FetchFailed(String),

    /// The summary service returned an error or could not be reached.
    ///
    /// The message is shown to the user as is.
    #[error("{0}")]
    SummaryFailed(String),

    /// No summary service has been configured for the server.
    #[error("transaction summaries are not available")]
    SummaryUnavailable,

    /// The CSV had issues that prevented it from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// The selected transactions could not be written as CSV.
    #[error("could not export transactions as CSV: {0}")]
    ExportError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            Error::FetchFailed(message) => InternalServerError {
                description: "Could not load transactions",
                fix: &message,
            }
            .into_response(),
            error @ Error::DuplicateTransactionId(_) => InternalServerError {
                description: "Could not load transactions",
                fix: &error.to_string(),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::SummaryFailed(message) => (
                StatusCode::BAD_GATEWAY,
                Alert::error("Could not summarize transactions", &message),
            )
                .into_response(),
            Error::SummaryUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                Alert::error(
                    "Summaries unavailable",
                    "No summary service has been configured for this server.",
                ),
            )
                .into_response(),
            Error::FetchFailed(message) => (
                StatusCode::BAD_GATEWAY,
                Alert::error("Could not load transactions", &message),
            )
                .into_response(),
            Error::DuplicateTransactionId(id) => (
                StatusCode::BAD_GATEWAY,
                Alert::error(
                    "Could not load transactions",
                    &format!("The transaction ID {id} appears more than once."),
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                ),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
                    .into_response()
            }
        }
    }
}
