//! Application router configuration.

use axum::{
    Json, Router,
    response::Redirect,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    analysis::{
        export_transactions, get_analysis_content, get_analysis_page, summarize_transactions,
    },
    dashboard::get_dashboard_page,
    directory::{get_events_page, get_services_page},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{get_recent_transactions_endpoint, get_transactions_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::ANALYSIS_VIEW, get(get_analysis_page))
        .route(endpoints::ANALYSIS_CONTENT, get(get_analysis_content))
        .route(endpoints::ANALYSIS_EXPORT, get(export_transactions))
        .route(endpoints::SERVICES_VIEW, get(get_services_page))
        .route(endpoints::EVENTS_VIEW, get(get_events_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::TRANSACTIONS_API, get(get_transactions_endpoint))
        .route(
            endpoints::RECENT_TRANSACTIONS_API,
            get(get_recent_transactions_endpoint),
        )
        .route(endpoints::ANALYSIS_SUMMARY, post(summarize_transactions));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}
