use std::{fs::OpenOptions, net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use campus_card::{
    AppState, SummaryClient, TransactionSource, build_router, graceful_shutdown,
    logging_middleware,
};

/// The web server for the campus card dashboard and balance analysis pages.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "CAMPUS_CARD_DB_PATH")]
    db_path: String,

    /// The port to serve the app from.
    #[arg(short, long, env = "CAMPUS_CARD_PORT", default_value_t = 3000)]
    port: u16,

    /// The canonical name of the local timezone, e.g. "Asia/Shanghai".
    #[arg(long, env = "CAMPUS_CARD_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// A URL that returns the transactions as JSON. Defaults to the app's database.
    #[arg(long, env = "CAMPUS_CARD_TRANSACTIONS_URL")]
    transactions_url: Option<String>,

    /// The URL of the service that summarizes selected transactions.
    #[arg(long, env = "CAMPUS_CARD_SUMMARY_URL")]
    summary_url: Option<String>,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let transaction_source = match &args.transactions_url {
        Some(url) => {
            tracing::info!("Loading transactions from {url}");
            TransactionSource::http(url)
        }
        None => TransactionSource::Database,
    };
    let summary_client = args.summary_url.as_deref().map(SummaryClient::new);
    if summary_client.is_none() {
        tracing::warn!("No summary service configured, transaction summaries are disabled.");
    }

    let conn = Connection::open(&args.db_path).expect("Could not open the database.");
    let state = AppState::new(conn, &args.timezone, transaction_source, summary_client)
        .expect("Could not initialize the database.");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(
        build_router(state).layer(middleware::from_fn(logging_middleware)),
    );

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly.");
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged by the handlers, so skip the default 5xx logging.
        .on_failure(());

    router.layer(tracing_layer)
}
