//! The navigation bar shown at the top of every page.

use maud::{Markup, html};

use crate::endpoints;

const CURRENT_LINK_STYLE: &str = "block py-2 px-3 text-white bg-blue-700 rounded-sm \
    md:bg-transparent md:text-blue-700 md:p-0 dark:text-white md:dark:text-blue-500";

const LINK_STYLE: &str = "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100 \
    md:hover:bg-transparent md:border-0 md:hover:text-blue-700 md:p-0 dark:text-white \
    md:dark:hover:text-blue-500 dark:hover:bg-gray-700 dark:hover:text-white \
    md:dark:hover:bg-transparent";

/// The pages listed in the navigation bar, in display order.
const SECTIONS: [(&str, &str); 4] = [
    (endpoints::DASHBOARD_VIEW, "Dashboard"),
    (endpoints::ANALYSIS_VIEW, "Balance Analysis"),
    (endpoints::SERVICES_VIEW, "Services"),
    (endpoints::EVENTS_VIEW, "Events"),
];

/// A link in the navigation bar.
struct Link {
    url: &'static str,
    title: &'static str,
    is_current: bool,
}

/// The navigation bar with the link for the current section highlighted.
pub struct NavBar {
    links: Vec<Link>,
}

impl NavBar {
    /// Build the navigation bar for the page at `current_path`.
    ///
    /// A link is highlighted when `current_path` is its URL or a path below it,
    /// e.g. "/analysis/content" highlights "Balance Analysis".
    pub fn new(current_path: &str) -> Self {
        let links = SECTIONS
            .iter()
            .map(|&(url, title)| Link {
                url,
                title,
                is_current: is_within(current_path, url),
            })
            .collect();

        Self { links }
    }

    pub fn into_html(self) -> Markup {
        // Layout adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a href=(endpoints::ROOT) class="flex items-center"
                    {
                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Campus Card"
                        }
                    }

                    ul class="font-medium flex flex-row space-x-8"
                    {
                        @for link in &self.links {
                            li
                            {
                                a
                                    href=(link.url)
                                    class=(if link.is_current { CURRENT_LINK_STYLE } else { LINK_STYLE })
                                    aria-current=[link.is_current.then_some("page")]
                                {
                                    (link.title)
                                }
                            }
                        }
                    }
                }
            }
        )
    }
}

fn is_within(path: &str, section: &str) -> bool {
    path.strip_prefix(section)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod nav_bar_tests {
    use crate::{endpoints, navigation::NavBar};

    fn current_titles(current_path: &str) -> Vec<&'static str> {
        NavBar::new(current_path)
            .links
            .into_iter()
            .filter(|link| link.is_current)
            .map(|link| link.title)
            .collect()
    }

    #[test]
    fn highlights_current_section() {
        assert_eq!(current_titles(endpoints::DASHBOARD_VIEW), ["Dashboard"]);
        assert_eq!(current_titles(endpoints::ANALYSIS_VIEW), ["Balance Analysis"]);
        assert_eq!(current_titles(endpoints::ANALYSIS_EXPORT), ["Balance Analysis"]);
        assert_eq!(current_titles(endpoints::SERVICES_VIEW), ["Services"]);
        assert_eq!(current_titles(endpoints::EVENTS_VIEW), ["Events"]);
    }

    #[test]
    fn highlights_nothing_outside_sections() {
        assert!(current_titles(endpoints::ROOT).is_empty());
        assert!(current_titles(endpoints::INTERNAL_ERROR_VIEW).is_empty());
        assert!(current_titles("/analysis-old").is_empty());
    }

    #[test]
    fn marks_current_link_for_screen_readers() {
        let html = NavBar::new(endpoints::DASHBOARD_VIEW).into_html().into_string();

        assert_eq!(html.matches("aria-current=\"page\"").count(), 1);
    }
}
