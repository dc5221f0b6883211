//! Route handlers for the balance analysis page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, Query};
use axum_htmx::HxRequest;
use maud::Markup;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    analysis::{
        SummaryClient, TransactionLoad, TransactionSource, TransactionView, ViewParameters,
        export::{EXPORT_FILE_NAME, export_csv},
        query::{AnalysisQuery, analysis_url},
        views::{analysis_page, load_view, summary_view},
    },
    endpoints,
    timezone::local_now,
};

/// The state needed for the balance analysis page.
#[derive(Debug, Clone)]
pub struct AnalysisState {
    /// The database connection, used when transactions come from the database.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/New_York".
    pub local_timezone: String,
    /// Where the transactions come from.
    pub transaction_source: TransactionSource,
    /// The summary service, if one is configured.
    pub summary_client: Option<SummaryClient>,
}

impl FromRef<AppState> for AnalysisState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            transaction_source: state.transaction_source.clone(),
            summary_client: state.summary_client.clone(),
        }
    }
}

/// Display the balance analysis page with a loading indicator.
///
/// The transactions are fetched by a follow-up request to the content endpoint.
pub async fn get_analysis_page(Query(query): Query<AnalysisQuery>) -> Markup {
    analysis_page(&ViewParameters::from(query))
}

/// Render the body of the balance analysis page.
///
/// Requests that did not come from HTMX are redirected to the full page.
pub async fn get_analysis_content(
    State(state): State<AnalysisState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<AnalysisQuery>,
) -> Response {
    let parameters = ViewParameters::from(query);

    if !is_htmx_request {
        return Redirect::to(&analysis_url(endpoints::ANALYSIS_VIEW, &parameters)).into_response();
    }

    let now = match local_now(&state.local_timezone) {
        Ok(now) => now,
        Err(error) => return error.into_alert_response(),
    };

    let load = TransactionLoad::from_result(
        state
            .transaction_source
            .fetch(&state.db_connection, &state.local_timezone)
            .await,
    );

    load_view(
        &load,
        &parameters,
        Some(now),
        state.summary_client.is_some(),
    )
    .into_response()
}

/// Download the selected transactions as a CSV file.
pub async fn export_transactions(
    State(state): State<AnalysisState>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Response, Error> {
    let parameters = ViewParameters::from(query);
    let now = local_now(&state.local_timezone)?;
    let transactions = state
        .transaction_source
        .fetch(&state.db_connection, &state.local_timezone)
        .await?;
    let view = TransactionView::new(&transactions, &parameters, now);

    let csv = export_csv(view.selected())?;
    tracing::debug!("Exporting {} transactions", view.selected().len());

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Request a summary of the selected transactions from the summary service.
///
/// Responds with an HTML fragment holding either the summary or an alert
/// with the reason it could not be produced.
pub async fn summarize_transactions(
    State(state): State<AnalysisState>,
    Form(query): Form<AnalysisQuery>,
) -> Response {
    let Some(summary_client) = state.summary_client else {
        return Error::SummaryUnavailable.into_alert_response();
    };

    let parameters = ViewParameters::from(query);
    let now = match local_now(&state.local_timezone) {
        Ok(now) => now,
        Err(error) => return error.into_alert_response(),
    };
    let transactions = match state
        .transaction_source
        .fetch(&state.db_connection, &state.local_timezone)
        .await
    {
        Ok(transactions) => transactions,
        Err(error) => return error.into_alert_response(),
    };
    let view = TransactionView::new(&transactions, &parameters, now);

    if view.selected().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Alert::error(
                "Nothing to summarize",
                "Select at least one transaction to summarize.",
            ),
        )
            .into_response();
    }

    match summary_client.summarize(view.selected()).await {
        Ok(summary) => summary_view(&summary).into_response(),
        Err(error) => error.into_alert_response(),
    }
}
