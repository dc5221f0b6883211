//! Client for the service that writes a text summary of transactions.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Error, transaction::Transaction};

/// Sends transactions to a summary service.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct SummaryRequest<'a> {
    transactions: &'a [&'a Transaction],
}

/// The body of a response from the summary service.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SummaryResponse {
    Summary { summary: String },
    Error { message: String },
}

impl SummaryClient {
    /// Create a client that POSTs to `url`.
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_owned(),
        }
    }

    /// Ask the service to summarize `transactions`.
    ///
    /// The request is made once, failures are not retried.
    ///
    /// # Errors
    /// Returns [Error::SummaryFailed] with the service's `message` when it
    /// responds with one, or with a description of what went wrong otherwise.
    pub async fn summarize(&self, transactions: &[&Transaction]) -> Result<String, Error> {
        tracing::debug!(
            "Requesting a summary of {} transactions from {}",
            transactions.len(),
            self.url
        );

        let response = self
            .client
            .post(&self.url)
            .json(&SummaryRequest { transactions })
            .send()
            .await
            .map_err(|error| Error::SummaryFailed(error.to_string()))?;

        let status = response.status();
        let body = response.json::<SummaryResponse>().await;

        match (status.is_success(), body) {
            (_, Ok(SummaryResponse::Error { message })) => Err(Error::SummaryFailed(message)),
            (true, Ok(SummaryResponse::Summary { summary })) => Ok(summary),
            (true, Err(error)) => Err(Error::SummaryFailed(format!(
                "Invalid summary response: {error}"
            ))),
            (false, _) => Err(Error::SummaryFailed(format!(
                "Summary request failed: {}",
                status.as_u16()
            ))),
        }
    }
}
