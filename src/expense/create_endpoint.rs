//! Defines the endpoint for creating a new expense.

use axum::{
    extract::{Query, State},
    response::Response,
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;

use crate::expense::{
    ListQuery,
    form::{ExpenseForm, submit_expense_form},
    state::ExpenseState,
};

/// A route handler for creating a new expense, redirects to the expense list on success.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    Query(query): Query<ListQuery>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    submit_expense_form(&state, &query, form.into_buffer(None))
}
