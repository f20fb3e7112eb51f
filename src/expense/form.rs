//! The expense form data and the shared submit logic for the create and
//! update endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::expense::{
    ExpenseController, ExpenseFilter, ExpenseId, FormBuffer, ListQuery, state::ExpenseState,
};

/// The form data for creating or updating an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// The amount spent in dollars.
    pub amount: f64,
    /// The day the money was spent.
    pub date: Date,
    /// Text detailing the expense.
    #[serde(default)]
    pub description: Option<String>,
    /// The canonical name of the category.
    #[serde(default)]
    pub category: Option<String>,
}

impl ExpenseForm {
    /// Convert the form into a buffer for the expense `id`, or a new expense if `id` is `None`.
    pub fn into_buffer(self, id: Option<ExpenseId>) -> FormBuffer {
        FormBuffer {
            id,
            amount: self.amount,
            description: self.description.unwrap_or_default(),
            date: self.date,
            category: self.category.unwrap_or_default(),
        }
    }
}

/// Save `buffer` and redirect to the list showing the filter in `query`.
///
/// Errors are rendered as alerts so the form keeps the user's input.
pub(super) fn submit_expense_form(
    state: &ExpenseState,
    query: &ListQuery,
    buffer: FormBuffer,
) -> Response {
    let filter = match state
        .today()
        .and_then(|today| ExpenseFilter::from_query(query, today))
    {
        Ok(filter) => filter,
        Err(error) => return error.into_alert_response(),
    };

    let mut controller = ExpenseController::new(filter);
    controller.open_form(buffer);

    match controller.submit(&mut state.store(), OffsetDateTime::now_utc()) {
        Ok(request) => (
            HxRedirect(request.filter.list_url()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
