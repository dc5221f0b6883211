//! Where the balance analysis page gets its transactions from.

use std::{collections::HashSet, sync::Mutex};

use reqwest::Client;
use rusqlite::Connection;

use crate::{
    Error,
    transaction::{Transaction, TransactionRecord, get_transactions},
};

/// The collaborator that provides the list of transactions.
#[derive(Debug, Clone, Default)]
pub enum TransactionSource {
    /// Read the transactions stored in the app's database.
    #[default]
    Database,
    /// GET a JSON array of transactions from another server.
    Http {
        /// The client used to make requests.
        client: Client,
        /// The URL that returns the transactions.
        url: String,
    },
}

impl TransactionSource {
    /// A source that fetches transactions from `url`.
    pub fn http(url: &str) -> Self {
        TransactionSource::Http {
            client: Client::new(),
            url: url.to_owned(),
        }
    }

    /// Load the full list of transactions.
    ///
    /// Remote dates with a UTC offset are converted to the local time in
    /// `canonical_timezone`.
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::FetchFailed] if the remote server cannot be reached, does not
    ///   respond with a success status or sends something other than transactions,
    /// - [Error::InvalidTimezoneError] if a remote date has an offset and
    ///   `canonical_timezone` is not a known timezone,
    /// - [Error::DuplicateTransactionId] if two transactions share an ID,
    /// - [Error::DatabaseLockError] or [Error::SqlError] if the database cannot be read.
    pub async fn fetch(
        &self,
        db_connection: &Mutex<Connection>,
        canonical_timezone: &str,
    ) -> Result<Vec<Transaction>, Error> {
        let transactions = match self {
            TransactionSource::Database => {
                let connection = db_connection
                    .lock()
                    .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
                    .map_err(|_| Error::DatabaseLockError)?;
                get_transactions(&connection)?
            }
            TransactionSource::Http { client, url } => {
                fetch_remote(client, url, canonical_timezone).await?
            }
        };

        ensure_unique_ids(&transactions)?;

        Ok(transactions)
    }
}

async fn fetch_remote(
    client: &Client,
    url: &str,
    canonical_timezone: &str,
) -> Result<Vec<Transaction>, Error> {
    tracing::debug!("Fetching transactions from {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|error| Error::FetchFailed(format!("Failed to fetch transactions: {error}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::FetchFailed(format!(
            "Failed to fetch transactions: {}",
            status.as_u16()
        )));
    }

    let records: Vec<TransactionRecord> = response
        .json()
        .await
        .map_err(|error| Error::FetchFailed(format!("Failed to fetch transactions: {error}")))?;

    records
        .into_iter()
        .map(|record| {
            let id = record.id;
            record.into_transaction(canonical_timezone).map_err(|error| match error {
                Error::InvalidTimestamp(_) => Error::FetchFailed(format!(
                    "Failed to fetch transactions: transaction {id}: {error}"
                )),
                error => error,
            })
        })
        .collect()
}

/// Reject a batch of transactions in which two transactions share an ID.
///
/// # Errors
/// Returns [Error::DuplicateTransactionId] with the first repeated ID.
pub fn ensure_unique_ids(transactions: &[Transaction]) -> Result<(), Error> {
    let mut seen = HashSet::with_capacity(transactions.len());

    for transaction in transactions {
        if !seen.insert(transaction.id) {
            return Err(Error::DuplicateTransactionId(transaction.id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::{Json, Router, http::StatusCode, routing::get};
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        db::initialize,
        test_utils::spawn_test_server,
        transaction::{Transaction, upsert_transaction},
    };

    use super::{TransactionSource, ensure_unique_ids};

    const TIMEZONE: &str = "Etc/UTC";

    fn test_transactions() -> Vec<Transaction> {
        vec![
            Transaction::build(1, -4.5, datetime!(2024-09-07 13:06:41), "Cafe")
                .category("Food")
                .location("Library")
                .finalise(),
            Transaction::build(2, 50.0, datetime!(2024-09-06 09:00:00), "Top Up").finalise(),
        ]
    }

    fn get_test_connection() -> Mutex<Connection> {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        Mutex::new(conn)
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut transactions = test_transactions();
        transactions.push(transactions[0].clone());

        assert_eq!(
            ensure_unique_ids(&transactions),
            Err(Error::DuplicateTransactionId(1))
        );
    }

    #[tokio::test]
    async fn database_source_reads_stored_transactions() {
        let conn = get_test_connection();
        for transaction in test_transactions() {
            upsert_transaction(&transaction, &conn.lock().unwrap()).unwrap();
        }

        let got = TransactionSource::Database.fetch(&conn, TIMEZONE).await;

        assert_eq!(got, Ok(test_transactions()));
    }

    #[tokio::test]
    async fn http_source_parses_json_array() {
        let router = Router::new().route(
            "/transactions",
            get(|| async {
                Json(serde_json::json!([
                    {
                        "id": 1,
                        "merchant": "Cafe",
                        "category": "Food",
                        "amount": -4.5,
                        "location": "Library",
                        "date": "2024-09-07T13:06:41"
                    },
                    {
                        "id": 2,
                        "merchant": "Top Up",
                        "category": null,
                        "amount": 50.0,
                        "location": "",
                        "date": "2024-09-06 09:00:00"
                    }
                ]))
            }),
        );
        let base_url = spawn_test_server(router).await;
        let source = TransactionSource::http(&format!("{base_url}/transactions"));

        let got = source.fetch(&get_test_connection(), TIMEZONE).await;

        assert_eq!(got, Ok(test_transactions()));
    }

    #[tokio::test]
    async fn http_source_reports_status_code() {
        let router = Router::new().route(
            "/transactions",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base_url = spawn_test_server(router).await;
        let source = TransactionSource::http(&format!("{base_url}/transactions"));

        let got = source.fetch(&get_test_connection(), TIMEZONE).await;

        assert_eq!(
            got,
            Err(Error::FetchFailed(
                "Failed to fetch transactions: 503".to_owned()
            ))
        );
    }

    #[tokio::test]
    async fn http_source_rejects_duplicate_ids() {
        let router = Router::new().route(
            "/transactions",
            get(|| async {
                let transaction = serde_json::json!({
                    "id": 3,
                    "merchant": "Cafe",
                    "amount": -1.0,
                    "location": "Library",
                    "date": "2024-09-07T13:06:41"
                });
                Json(serde_json::json!([transaction.clone(), transaction]))
            }),
        );
        let base_url = spawn_test_server(router).await;
        let source = TransactionSource::http(&format!("{base_url}/transactions"));

        let got = source.fetch(&get_test_connection(), TIMEZONE).await;

        assert_eq!(got, Err(Error::DuplicateTransactionId(3)));
    }

    #[tokio::test]
    async fn http_source_accepts_null_text_fields() {
        let router = Router::new().route(
            "/transactions",
            get(|| async {
                Json(serde_json::json!([{
                    "id": 1,
                    "merchant": null,
                    "category": null,
                    "amount": 20.0,
                    "location": null,
                    "date": "2024-09-07T13:06:41"
                }]))
            }),
        );
        let base_url = spawn_test_server(router).await;
        let source = TransactionSource::http(&format!("{base_url}/transactions"));

        let got = source.fetch(&get_test_connection(), TIMEZONE).await;

        assert_eq!(
            got,
            Ok(vec![
                Transaction::build(1, 20.0, datetime!(2024-09-07 13:06:41), "").finalise()
            ])
        );
    }

    #[tokio::test]
    async fn http_source_converts_offset_dates() {
        let router = Router::new().route(
            "/transactions",
            get(|| async {
                Json(serde_json::json!([
                    {
                        "id": 1,
                        "merchant": "Cafe",
                        "amount": -4.5,
                        "location": "Library",
                        "date": "2024-09-07T13:06:41+00:00"
                    },
                    {
                        "id": 2,
                        "merchant": "Top Up",
                        "amount": 50.0,
                        "location": "",
                        "date": "2024-09-06T04:00:00-05:00"
                    }
                ]))
            }),
        );
        let base_url = spawn_test_server(router).await;
        let source = TransactionSource::http(&format!("{base_url}/transactions"));

        let got = source.fetch(&get_test_connection(), TIMEZONE).await.unwrap();

        assert_eq!(got[0].date, datetime!(2024-09-07 13:06:41));
        assert_eq!(got[1].date, datetime!(2024-09-06 09:00:00));
    }

    #[tokio::test]
    async fn http_source_reports_bad_dates() {
        let router = Router::new().route(
            "/transactions",
            get(|| async {
                Json(serde_json::json!([{
                    "id": 8,
                    "merchant": "Cafe",
                    "amount": -1.0,
                    "location": "Library",
                    "date": "yesterday"
                }]))
            }),
        );
        let base_url = spawn_test_server(router).await;
        let source = TransactionSource::http(&format!("{base_url}/transactions"));

        let got = source.fetch(&get_test_connection(), TIMEZONE).await;

        assert_eq!(
            got,
            Err(Error::FetchFailed(
                "Failed to fetch transactions: transaction 8: \
                could not parse \"yesterday\" as a date and time"
                    .to_owned()
            ))
        );
    }
}
