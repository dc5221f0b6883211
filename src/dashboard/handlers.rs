//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    analysis::TransactionSource,
    dashboard::summary::{DailySummary, recent_transactions},
    endpoints,
    html::{
        AMOUNT_NEGATIVE_STYLE, AMOUNT_POSITIVE_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, amount_color_class, base,
        format_currency, format_signed_currency, link,
    },
    navigation::NavBar,
    timezone::local_now,
    transaction::{RECENT_TRANSACTION_LIMIT, Transaction},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection, used when transactions come from the database.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/New_York".
    pub local_timezone: String,
    /// Where the transactions come from.
    pub transaction_source: TransactionSource,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            transaction_source: state.transaction_source.clone(),
        }
    }
}

/// Display a page with today's totals and the most recent transactions.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Markup, Error> {
    let today = local_now(&state.local_timezone)?.date();
    let fetched = state
        .transaction_source
        .fetch(&state.db_connection, &state.local_timezone)
        .await;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let body = match fetched {
        Ok(transactions) if transactions.is_empty() => dashboard_no_data_view(),
        Ok(transactions) => dashboard_view(
            &DailySummary::for_day(&transactions, today),
            &recent_transactions(&transactions, RECENT_TRANSACTION_LIMIT as usize),
        ),
        Err(error) => {
            tracing::warn!("Could not load transactions for the dashboard: {error}");
            html!(
                p role="alert" class="py-4 text-sm text-red-600 dark:text-red-400"
                {
                    (error.to_string())
                }
            )
        }
    };

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4 self-start" { "Dashboard" }

            (body)
        }
    );

    Ok(base("Dashboard", &[], &content))
}

fn dashboard_no_data_view() -> Markup {
    html!(
        section id="no-data" class="text-center"
        {
            h2 class="text-xl font-bold" { "Nothing here yet..." }

            p
            {
                "Your transactions will show up here once you start using your campus card. "
                "You can also load an export with the ingest tool."
            }
        }
    )
}

fn dashboard_view(summary: &DailySummary, recent: &[&Transaction]) -> Markup {
    let analysis_link = link(endpoints::ANALYSIS_VIEW, "Balance Analysis");

    html!(
        div class="w-full grid grid-cols-1 lg:grid-cols-3 gap-4"
        {
            section id="recent-activity" class={"lg:col-span-2 " (CARD_STYLE)}
            {
                h2 class="text-lg font-semibold mb-2" { "Recent activity" }

                (recent_table(recent))

                p class="mt-2 text-sm"
                {
                    "See more in " (analysis_link) "."
                }
            }

            section id="today-summary" class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-2" { "Today's summary" }

                dl class="grid grid-cols-2 gap-2 text-sm"
                {
                    dt { "Money in" }
                    dd id="money-in" class={"text-right " (AMOUNT_POSITIVE_STYLE)}
                    {
                        (format_currency(summary.money_in))
                    }

                    dt { "Money out" }
                    dd id="money-out" class={"text-right " (AMOUNT_NEGATIVE_STYLE)}
                    {
                        (format_currency(summary.money_out.abs()))
                    }

                    dt class="font-semibold" { "Net" }
                    dd id="net" class={"text-right font-semibold " (amount_color_class(summary.net))}
                    {
                        (format_signed_currency(summary.net))
                    }
                }
            }
        }
    )
}

fn recent_table(recent: &[&Transaction]) -> Markup {
    html!(
        div class="overflow-x-auto"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Merchant" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Location" }
                        th scope="col" class={"text-right " (TABLE_CELL_STYLE)} { "Amount" }
                    }
                }

                tbody
                {
                    @for transaction in recent {
                        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
                        {
                            td class=(TABLE_CELL_STYLE) { (transaction.merchant) }
                            td class=(TABLE_CELL_STYLE) { (transaction.category_label()) }
                            td class=(TABLE_CELL_STYLE) { (transaction.location) }
                            td class={"text-right " (TABLE_CELL_STYLE) " " (amount_color_class(transaction.amount))}
                            {
                                (format_signed_currency(transaction.amount))
                            }
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
    use rusqlite::Connection;
    use scraper::Html;
    use time::{Duration, PrimitiveDateTime};

    use crate::{
        analysis::TransactionSource,
        db::initialize,
        test_utils::{
            assert_status_ok, assert_valid_html, element_text, parse_html_document, select_all,
            spawn_test_server,
        },
        timezone::local_now,
        transaction::{Transaction, upsert_transaction},
    };

    use super::{DashboardState, get_dashboard_page};

    const TIMEZONE: &str = "Etc/UTC";

    fn get_test_state(transactions: &[Transaction]) -> DashboardState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        for transaction in transactions {
            upsert_transaction(transaction, &conn).unwrap();
        }

        DashboardState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: TIMEZONE.to_owned(),
            transaction_source: TransactionSource::Database,
        }
    }

    async fn get_page(state: DashboardState) -> Html {
        let response = get_dashboard_page(State(state))
            .await
            .expect("dashboard should render")
            .into_response();
        assert_status_ok(&response);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    #[track_caller]
    fn assert_text(html: &Html, selector: &str, want: &str) {
        let elements = select_all(html, selector);
        assert_eq!(elements.len(), 1, "want one element matching {selector}");
        assert_eq!(element_text(&elements[0]), want);
    }

    /// The start of today, so that adding a few hours stays on the same day.
    fn start_of_today() -> PrimitiveDateTime {
        local_now(TIMEZONE).unwrap().replace_time(time::Time::MIDNIGHT)
    }

    #[tokio::test]
    async fn shows_todays_summary() {
        let today = start_of_today();
        let state = get_test_state(&[
            Transaction::build(1, 20.0, today + Duration::minutes(1), "Top Up").finalise(),
            Transaction::build(2, -7.5, today + Duration::minutes(2), "Dining Hall").finalise(),
            Transaction::build(3, -99.0, today - Duration::days(1), "Bookstore").finalise(),
        ]);

        let html = get_page(state).await;

        assert_text(&html, "#money-in", "$20.00");
        assert_text(&html, "#money-out", "$7.50");
        assert_text(&html, "#net", "+$12.50");
    }

    #[tokio::test]
    async fn lists_twenty_most_recent_transactions() {
        let today = start_of_today();
        let transactions: Vec<_> = (1..=25)
            .map(|id| {
                Transaction::build(id, -1.0, today - Duration::days(id), "Cafe")
                    .category("Food")
                    .finalise()
            })
            .collect();
        let state = get_test_state(&transactions);

        let html = get_page(state).await;

        let rows = select_all(&html, "#recent-activity tbody tr");
        assert_eq!(rows.len(), 20);
        assert_eq!(rows[0].value().attr("data-transaction-id"), Some("1"));
        assert_eq!(rows[19].value().attr("data-transaction-id"), Some("20"));
    }

    #[tokio::test]
    async fn shows_no_data_message_without_transactions() {
        let html = get_page(get_test_state(&[])).await;

        assert_eq!(select_all(&html, "#no-data").len(), 1);
        assert!(select_all(&html, "#recent-activity").is_empty());
    }

    #[tokio::test]
    async fn shows_fetch_error() {
        let router = Router::new().route(
            "/transactions",
            get(|| async { StatusCode::NOT_FOUND }),
        );
        let base_url = spawn_test_server(router).await;
        let mut state = get_test_state(&[]);
        state.transaction_source = TransactionSource::http(&format!("{base_url}/transactions"));

        let html = get_page(state).await;

        assert_text(&html, "[role=alert]", "Failed to fetch transactions: 404");
    }
}
