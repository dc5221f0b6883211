//! HTML views for the balance analysis page.

use maud::{Markup, html};
use time::PrimitiveDateTime;

use crate::{
    analysis::{
        CategoryFilter, Period, TransactionLoad, TransactionView, ViewParameters,
        charts::{AnalysisChart, category_chart, charts_view, daily_chart},
        filter::categories,
        query::analysis_url,
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_SELECT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, amount_color_class, base, format_signed_currency,
        loading_spinner,
    },
    navigation::NavBar,
    transaction::Transaction,
};

/// The ID of the element that holds the body of the page.
pub(super) const CONTENT_ID: &str = "analysis-content";
/// The ID of the element that holds the summary or its error.
pub(super) const SUMMARY_PANEL_ID: &str = "summary-panel";

/// The page shell, which loads its body from the content endpoint once shown.
pub(super) fn analysis_page(parameters: &ViewParameters) -> Markup {
    let nav_bar = NavBar::new(endpoints::ANALYSIS_VIEW).into_html();
    let content_url = analysis_url(endpoints::ANALYSIS_CONTENT, parameters);

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4 self-start" { "Balance Analysis" }

            div
                id=(CONTENT_ID)
                class="w-full"
                hx-get=(content_url)
                hx-trigger="load"
                hx-swap="innerHTML"
            {
                (load_view(&TransactionLoad::Pending, parameters, None, false))
            }
        }
    );

    let scripts = [HeadElement::ScriptLink(
        "/static/echarts.6.0.0.min.js".to_owned(),
    )];

    base("Balance Analysis", &scripts, &content)
}

/// The body of the page for the current state of the transaction list.
///
/// `now` is only needed once the transactions have loaded.
pub(super) fn load_view(
    load: &TransactionLoad,
    parameters: &ViewParameters,
    now: Option<PrimitiveDateTime>,
    summaries_enabled: bool,
) -> Markup {
    match (load, now) {
        (TransactionLoad::Loaded(transactions), Some(now)) => {
            let view = TransactionView::new(transactions, parameters, now);
            let categories = categories(transactions);

            loaded_view(&view, &categories, parameters, summaries_enabled)
        }
        (TransactionLoad::Failed(message), _) => html!(
            p
                role="alert"
                class="py-4 text-sm text-red-600 dark:text-red-400"
            {
                (message)
            }
        ),
        _ => html!(
            p
                id="loading-indicator"
                class="py-4 text-sm text-gray-500 dark:text-gray-400"
            {
                (loading_spinner())
                "Loading transactions..."
            }
        ),
    }
}

fn loaded_view(
    view: &TransactionView<'_>,
    categories: &[&str],
    parameters: &ViewParameters,
    summaries_enabled: bool,
) -> Markup {
    html!(
        (filter_form(categories, parameters))

        section class={"w-full mb-4 " (CARD_STYLE)}
        {
            (selection_toolbar(view, parameters))

            @if view.visible().is_empty() {
                p
                    id="no-transactions"
                    class="py-4 text-sm text-gray-500 dark:text-gray-400"
                {
                    "No transactions match these filters."
                }
            } @else {
                (transaction_table(view, parameters))
            }
        }

        @if view.aggregate_source().is_empty() {
            p
                id="no-chart-data"
                class="w-full mb-4 text-sm text-gray-500 dark:text-gray-400"
            {
                "No data to chart for this period."
            }
        } @else {
            (charts_view(&[
                AnalysisChart {
                    id: "category-chart",
                    options: category_chart(&view.category_totals()).to_string(),
                },
                AnalysisChart {
                    id: "daily-chart",
                    options: daily_chart(&view.daily_totals()).to_string(),
                },
            ]))
        }

        (summary_section(view, parameters, summaries_enabled))
    )
}

/// Hidden inputs that carry the selection, and optionally the filters, with a form.
fn hidden_inputs(parameters: &ViewParameters, include_filters: bool) -> Markup {
    html!(
        @if include_filters {
            input type="hidden" name="period" value=(parameters.period.as_query_value());
            input type="hidden" name="category" value=(parameters.category.as_query_value());
        }

        @for id in parameters.selection.ids() {
            input type="hidden" name="selected" value=(id);
        }
    )
}

fn filter_form(categories: &[&str], parameters: &ViewParameters) -> Markup {
    html!(
        form
            id="filters"
            hx-get=(endpoints::ANALYSIS_CONTENT)
            hx-target={"#" (CONTENT_ID)}
            hx-swap="innerHTML"
            hx-trigger="change"
            class="w-full grid grid-cols-1 md:grid-cols-2 gap-4 mb-4"
        {
            div
            {
                label for="period" class=(FORM_LABEL_STYLE) { "Period" }

                select id="period" name="period" class=(FORM_SELECT_STYLE)
                {
                    @for period in Period::ALL {
                        option
                            value=(period.as_query_value())
                            selected[period == parameters.period]
                        {
                            (period.label())
                        }
                    }
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select id="category" name="category" class=(FORM_SELECT_STYLE)
                {
                    option
                        value=(CategoryFilter::ALL_VALUE)
                        selected[parameters.category == CategoryFilter::All]
                    {
                        "All categories"
                    }

                    @for category in categories {
                        option
                            value=(category)
                            selected[matches!(
                                &parameters.category,
                                CategoryFilter::Exact(selected) if selected.as_str() == *category
                            )]
                        {
                            (category)
                        }
                    }
                }
            }

            (hidden_inputs(parameters, false))

            span class="htmx-indicator text-sm text-gray-500" { (loading_spinner()) "Updating..." }
        }
    )
}

fn selection_toolbar(view: &TransactionView<'_>, parameters: &ViewParameters) -> Markup {
    let all_selected = parameters.selection.all_selected(view.visible());
    let toggle_all_url = analysis_url(
        endpoints::ANALYSIS_CONTENT,
        &parameters.with_selection(parameters.selection.toggled_all(view.visible())),
    );
    let export_url = analysis_url(endpoints::ANALYSIS_EXPORT, parameters);

    html!(
        div class="flex flex-wrap items-center justify-between gap-2 mb-2"
        {
            p id="selection-count" class="text-sm"
            {
                (view.selected().len()) " of " (view.visible().len()) " selected"
            }

            div class="flex gap-2"
            {
                button
                    id="toggle-all"
                    type="button"
                    class=(BUTTON_SECONDARY_STYLE)
                    hx-get=(toggle_all_url)
                    hx-target={"#" (CONTENT_ID)}
                    hx-swap="innerHTML"
                    disabled[view.visible().is_empty()]
                {
                    @if all_selected { "Deselect all" } @else { "Select all" }
                }

                @if view.selected().is_empty() {
                    button
                        id="export"
                        type="button"
                        class=(BUTTON_SECONDARY_STYLE)
                        disabled
                    {
                        "Export CSV"
                    }
                } @else {
                    a
                        id="export"
                        href=(export_url)
                        download="transactions.csv"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Export CSV"
                    }
                }
            }
        }
    )
}

fn transaction_table(view: &TransactionView<'_>, parameters: &ViewParameters) -> Markup {
    html!(
        div class="overflow-x-auto"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Selected" } }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Merchant" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Location" }
                        th scope="col" class={"text-right " (TABLE_CELL_STYLE)} { "Amount" }
                    }
                }

                tbody
                {
                    @for transaction in view.visible() {
                        (transaction_row(transaction, parameters))
                    }
                }
            }
        }
    )
}

fn transaction_row(transaction: &Transaction, parameters: &ViewParameters) -> Markup {
    let is_selected = parameters.selection.contains(transaction.id);
    let toggle_url = analysis_url(
        endpoints::ANALYSIS_CONTENT,
        &parameters.with_selection(parameters.selection.toggled(transaction.id)),
    );

    html!(
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE)
            {
                input
                    type="checkbox"
                    aria-label={"Select transaction " (transaction.id)}
                    checked[is_selected]
                    hx-get=(toggle_url)
                    hx-target={"#" (CONTENT_ID)}
                    hx-swap="innerHTML";
            }
            td class=(TABLE_CELL_STYLE) { (format_date(transaction.date)) }
            td class=(TABLE_CELL_STYLE) { (transaction.merchant) }
            td class=(TABLE_CELL_STYLE) { (transaction.category_label()) }
            td class=(TABLE_CELL_STYLE) { (transaction.location) }
            td class={"text-right " (TABLE_CELL_STYLE) " " (amount_color_class(transaction.amount))}
            {
                (format_signed_currency(transaction.amount))
            }
        }
    )
}

fn summary_section(
    view: &TransactionView<'_>,
    parameters: &ViewParameters,
    summaries_enabled: bool,
) -> Markup {
    let can_summarize = summaries_enabled && !view.selected().is_empty();

    html!(
        section class={"w-full " (CARD_STYLE)}
        {
            h2 class="text-lg font-semibold mb-2" { "Summary" }

            form
                id="summary-form"
                hx-post=(endpoints::ANALYSIS_SUMMARY)
                hx-target={"#" (SUMMARY_PANEL_ID)}
                hx-target-error={"#" (SUMMARY_PANEL_ID)}
                hx-swap="innerHTML"
                class="mb-4"
            {
                (hidden_inputs(parameters, true))

                button
                    type="submit"
                    class=(BUTTON_PRIMARY_STYLE)
                    disabled[!can_summarize]
                {
                    span class="htmx-indicator" { (loading_spinner()) }
                    "Summarize selected transactions"
                }
            }

            div id=(SUMMARY_PANEL_ID) class="text-sm"
            {
                @if !summaries_enabled {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "Summaries are not available on this server."
                    }
                } @else if view.selected().is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "Select transactions to summarize them."
                    }
                } @else {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "The summary will appear here."
                    }
                }
            }
        }
    )
}

/// The fragment shown after a successful summary request.
pub(super) fn summary_view(summary: &str) -> Markup {
    html!(
        p id="summary-text" class="whitespace-pre-line" { (summary) }
    )
}

/// Format a timestamp as `YYYY-MM-DD HH:MM` for display.
fn format_date(date: PrimitiveDateTime) -> String {
    format!("{} {:02}:{:02}", date.date(), date.hour(), date.minute())
}
