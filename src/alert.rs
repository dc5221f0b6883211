//! Alert messages shown in place of content that could not be produced.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An error message with a short title and a longer description.
///
/// Rendered as an HTML fragment so it can be swapped into a page by HTMX.
pub struct Alert<'a> {
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    pub fn into_html(self) -> Markup {
        html!(
            div
                role="alert"
                class="flex flex-col gap-1 p-4 text-sm text-red-800 rounded-lg
                    bg-red-50 dark:bg-gray-800 dark:text-red-400"
            {
                span class="font-semibold" { (self.message) }

                @if !self.details.is_empty() {
                    p { (self.details) }
                }
            }
        )
    }
}

impl IntoResponse for Alert<'_> {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::Alert;

    #[test]
    fn renders_message_and_details() {
        let html = Alert::error("Could not load transactions", "Failed to fetch transactions: 503")
            .into_html()
            .into_string();

        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("Could not load transactions"));
        assert!(html.contains("Failed to fetch transactions: 503"));
    }

    #[test]
    fn omits_empty_details() {
        let html = Alert::error("Something went wrong", "").into_html().into_string();

        assert!(!html.contains("<p>"));
    }
}
