//! Alerts for displaying error messages to users.
//!
//! Alerts are rendered as HTML fragments that HTMX swaps into the
//! `#alert-container` element of the base page.

use maud::{Markup, html};

/// An alert message.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An error with a summary and a suggested fix.
    Error {
        /// A short summary of the error.
        message: String,
        /// Additional details, e.g. how to fix the error.
        details: String,
    },
}

impl Alert {
    /// Render the alert as HTML.
    pub fn into_html(self) -> Markup {
        let Alert::Error { message, details } = self;

        html! {
            div
                role="alert"
                class="flex items-start gap-3 p-4 mb-4 text-sm text-red-800 rounded-lg
                    bg-red-50 dark:bg-gray-800 dark:text-red-400 shadow"
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (message) }

                    @if !details.is_empty() {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="font-bold"
                    hx-on:click="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }
}
