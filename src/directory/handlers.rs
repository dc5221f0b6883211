//! Pages for the student services directory and the campus events.

use axum_extra::extract::Query;
use maud::{Markup, html};
use time::macros::format_description;

use crate::{
    directory::{
        events::{CAMPUS_EVENTS, CampusEvent, SERVICE_SESSIONS, total_volunteer_hours},
        services::{SERVICES, Service, ServiceCategory, ServiceQuery, search_services},
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE,
        PAGE_CONTAINER_STYLE, base, format_currency,
    },
    navigation::NavBar,
    transaction::format_timestamp,
};

const BADGE_STYLE: &str = "inline-block px-2 py-0.5 rounded-lg text-xs font-medium \
    border border-gray-300 dark:border-gray-600";

const FORM_INPUT_STYLE: &str = "block w-full p-2 rounded text-sm \
    text-gray-900 bg-gray-50 border border-gray-300 \
    dark:bg-gray-700 dark:border-gray-600 dark:text-white";

/// Display the services directory, narrowed by the search form's keywords and category.
pub async fn get_services_page(Query(query): Query<ServiceQuery>) -> Markup {
    let results = search_services(&SERVICES, &query);
    let nav_bar = NavBar::new(endpoints::SERVICES_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full flex flex-col md:flex-row md:items-start justify-between gap-4 mb-6"
            {
                div
                {
                    h1 class="text-2xl font-bold" { "Student Services" }
                    p class="mt-2 text-gray-600 dark:text-gray-400"
                    {
                        "Find advising, financial aid, career help, wellness support, \
                        printing, catering, and more in one place."
                    }
                }

                (quick_contact_card())
            }

            (search_form(&query))

            p id="result-count" class="w-full my-4 text-sm text-gray-500"
            {
                "Showing " (results.len()) " service" @if results.len() != 1 { "s" }
            }

            div id="services" class="w-full grid md:grid-cols-2 lg:grid-cols-3 gap-4"
            {
                @for service in &results {
                    (service_card(service))
                }
            }

            section id="service-sessions" class="w-full mt-8"
            {
                h2 class="text-lg font-semibold mb-2" { "Upcoming sessions" }

                div class="grid md:grid-cols-2 gap-4"
                {
                    @for session in &SERVICE_SESSIONS {
                        div class=(CARD_STYLE)
                        {
                            div class="flex items-center justify-between"
                            {
                                h3 class="font-semibold" { (session.title) }
                                span class=(BADGE_STYLE) { (session.category) }
                            }
                            p class="text-sm text-gray-500" { (session.when) }
                            p class="text-sm" { (session.location) }
                        }
                    }
                }
            }

            (faq_section())
        }
    );

    base("Student Services", &[], &content)
}

/// Display the upcoming campus events.
pub async fn get_events_page() -> Markup {
    let nav_bar = NavBar::new(endpoints::EVENTS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-2 self-start" { "Upcoming Events" }

            p id="volunteer-hours" class="mb-4 self-start text-sm text-gray-600 dark:text-gray-400"
            {
                (total_volunteer_hours(&CAMPUS_EVENTS)) " volunteer hours on offer"
            }

            div id="events" class="w-full grid gap-4 sm:grid-cols-2 lg:grid-cols-3"
            {
                @for event in &CAMPUS_EVENTS {
                    (event_card(event))
                }
            }
        }
    );

    base("Events", &[], &content)
}

fn quick_contact_card() -> Markup {
    html!(
        aside class={"md:max-w-sm " (CARD_STYLE)}
        {
            h2 class="text-lg font-semibold" { "Need quick help?" }
            p class="text-sm text-gray-500 mb-2" { "Contact Student Services Central." }

            ul class="text-sm space-y-1"
            {
                li { "(555) 123-0000" }
                li { "help@university.edu" }
                li { "Mon-Fri, 9:00 AM - 5:00 PM" }
                li { "Campus Center, 1F" }
            }
        }
    )
}

fn search_form(query: &ServiceQuery) -> Markup {
    let selected = query.category_filter();

    html!(
        form
            method="get"
            action=(endpoints::SERVICES_VIEW)
            class={"w-full flex flex-col md:flex-row md:items-end gap-3 " (CARD_STYLE)}
        {
            div class="w-full"
            {
                label for="q" class=(FORM_LABEL_STYLE) { "Search services" }
                input
                    id="q"
                    name="q"
                    type="search"
                    value=(query.q)
                    placeholder="Try: FAFSA, resume, Wi-Fi, printing, catering..."
                    class=(FORM_INPUT_STYLE);
            }

            div class="w-full md:w-56"
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                select id="category" name="category" class=(FORM_SELECT_STYLE)
                {
                    option value="All" selected[selected.is_none()] { "All" }

                    @for category in ServiceCategory::ALL {
                        option value=(category.label()) selected[selected == Some(category)]
                        {
                            (category.label())
                        }
                    }
                }
            }

            div class="md:w-32"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Search" }
            }
        }
    )
}

fn service_card(service: &Service) -> Markup {
    let contact = &service.contact;

    html!(
        article class=(CARD_STYLE) data-service-id=(service.id)
        {
            div class="flex items-start justify-between gap-2"
            {
                h3 class="text-lg font-semibold" { (service.name) }

                @if let Some(cost) = contact.cost {
                    span class={"cost " (BADGE_STYLE)} { "Cost: " (cost) }
                }
            }

            p class="text-sm text-gray-600 dark:text-gray-400 my-2" { (service.description) }

            div class="flex flex-wrap gap-1 mb-2"
            {
                span class=(BADGE_STYLE) { (service.category.label()) }

                @for tag in service.tags {
                    span class=(BADGE_STYLE) { (tag) }
                }
            }

            ul class="text-sm space-y-1"
            {
                @if let Some(location) = contact.location { li { (location) } }
                @if let Some(email) = contact.email {
                    li { a href={"mailto:" (email)} class="hover:underline" { (email) } }
                }
                @if let Some(phone) = contact.phone { li { (phone) } }
            }
        }
    )
}

fn event_card(event: &CampusEvent) -> Markup {
    let start_time = event
        .start_time
        .format(format_description!(
            "[weekday repr:short], [month repr:short] [day padding:none], [hour repr:12 padding:none]:[minute] [period]"
        ))
        .unwrap_or_else(|_| event.start_time.to_string());

    html!(
        article class=(CARD_STYLE) data-event-id=(event.id)
        {
            h3 class="text-lg font-semibold" { (event.name) }
            p class="text-sm font-medium text-blue-600" { (event.category) }
            p class="text-sm" { (event.location) }
            p class="text-sm text-gray-500"
            {
                time datetime=(format_timestamp(event.start_time)) { (start_time) }
            }
            p class="cost text-sm"
            {
                @if event.is_free() { "Free" } @else { (format_currency(event.cost as f64)) }
            }

            @if let Some(hours) = event.volunteer_hours {
                p class="volunteer text-xs text-amber-600" { "Volunteer Hours: " (hours) }
            }
        }
    )
}

fn faq_section() -> Markup {
    const FAQ: [(&str, &str); 3] = [
        (
            "How do I book an advising appointment?",
            "Contact Academic Advising by email or phone, or visit the advising drop-ins \
            listed above.",
        ),
        (
            "Where can I get help with FAFSA?",
            "Visit Financial Aid during drop-in hours or join the FAFSA Help Night.",
        ),
        (
            "Is counseling confidential?",
            "Yes. Counseling & Wellness follows strict confidentiality policies and does not \
            share your information without consent, except in emergencies.",
        ),
    ];

    html!(
        section id="faq" class="w-full mt-8"
        {
            h2 class="text-lg font-semibold mb-2" { "FAQ" }

            @for (question, answer) in FAQ {
                details class={"mb-2 " (CARD_STYLE)}
                {
                    summary class="font-medium cursor-pointer" { (question) }
                    p class="mt-2 text-sm" { (answer) }
                }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::Query;
    use scraper::Html;

    use crate::{
        directory::{
            events::CAMPUS_EVENTS,
            services::{SERVICES, ServiceQuery},
        },
        test_utils::{assert_valid_html, element_text, select_all},
    };

    use super::{get_events_page, get_services_page};

    async fn services_page(q: &str, category: &str) -> Html {
        let query = ServiceQuery {
            q: q.to_owned(),
            category: category.to_owned(),
        };
        let html = Html::parse_document(&get_services_page(Query(query)).await.into_string());
        assert_valid_html(&html);
        html
    }

    fn service_ids(html: &Html) -> Vec<String> {
        select_all(html, "#services article")
            .iter()
            .filter_map(|card| card.value().attr("data-service-id"))
            .map(str::to_owned)
            .collect()
    }

    #[tokio::test]
    async fn lists_every_service_without_a_query() {
        let html = services_page("", "").await;

        assert_eq!(service_ids(&html).len(), SERVICES.len());
        assert_eq!(
            element_text(&select_all(&html, "#result-count")[0]),
            "Showing 9 services"
        );
    }

    #[tokio::test]
    async fn search_keeps_form_values_and_narrows_results() {
        let html = services_page("fafsa", "Finance").await;

        assert_eq!(service_ids(&html), ["fin-aid"]);
        assert_eq!(
            element_text(&select_all(&html, "#result-count")[0]),
            "Showing 1 service"
        );
        assert_eq!(select_all(&html, "#q")[0].value().attr("value"), Some("fafsa"));
        let selected = select_all(&html, "#category option[selected]");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value().attr("value"), Some("Finance"));
    }

    #[tokio::test]
    async fn only_paid_services_show_a_cost() {
        let html = services_page("", "").await;

        assert_eq!(select_all(&html, "#services .cost").len(), 3);
        assert_eq!(
            element_text(&select_all(&html, "[data-service-id=printing] .cost")[0]),
            "Cost: $0.10 per B/W page"
        );
    }

    #[tokio::test]
    async fn no_results_message_counts_zero() {
        let html = services_page("astronomy", "").await;

        assert!(service_ids(&html).is_empty());
        assert_eq!(
            element_text(&select_all(&html, "#result-count")[0]),
            "Showing 0 services"
        );
    }

    #[tokio::test]
    async fn events_page_lists_events_with_costs() {
        let html = Html::parse_document(&get_events_page().await.into_string());
        assert_valid_html(&html);

        let cards = select_all(&html, "#events article");
        assert_eq!(cards.len(), CAMPUS_EVENTS.len());

        let first_cost = select_all(&html, "[data-event-id='1'] .cost");
        assert_eq!(element_text(&first_cost[0]), "$5.00");
        let free_cost = select_all(&html, "[data-event-id='2'] .cost");
        assert_eq!(element_text(&free_cost[0]), "Free");

        assert_eq!(select_all(&html, "#events .volunteer").len(), 6);
        assert_eq!(
            element_text(&select_all(&html, "#volunteer-hours")[0]),
            "40 volunteer hours on offer"
        );
    }

    #[tokio::test]
    async fn events_page_shows_readable_start_times() {
        let html = Html::parse_document(&get_events_page().await.into_string());

        let time = select_all(&html, "[data-event-id='7'] time");
        assert_eq!(element_text(&time[0]), "Tue, Nov 11, 4:30 PM");
        assert_eq!(time[0].value().attr("datetime"), Some("2025-11-11T16:30:00"));
    }
}
