//! Defines the endpoint for deleting an expense.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};

use crate::expense::{
    ExpenseController, ExpenseFilter, ExpenseId, ListQuery, state::ExpenseState,
    views::expense_list,
};

/// A route handler for deleting an expense without confirmation.
///
/// Responds with the refreshed expense list for the filter in the query
/// string, or an alert if the expense could not be deleted.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Query(query): Query<ListQuery>,
) -> Response {
    let filter = match state
        .today()
        .and_then(|today| ExpenseFilter::from_query(&query, today))
    {
        Ok(filter) => filter,
        Err(error) => return error.into_alert_response(),
    };

    let mut store = state.store();
    let mut controller = ExpenseController::new(filter);

    let refreshed = controller
        .delete(&mut store, expense_id)
        .and_then(|request| controller.fulfil(&store, request));

    match refreshed {
        // The status code has to be 200 OK or HTMX will not swap in the list.
        Ok(_) => expense_list(controller.expenses(), controller.total(), controller.filter())
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
