//! Defines the endpoint for updating an existing expense.

use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use axum_extra::extract::Form;

use crate::expense::{
    ExpenseId, ListQuery,
    form::{ExpenseForm, submit_expense_form},
    state::ExpenseState,
};

/// A route handler for updating an expense, redirects to the expense list on success.
///
/// Only the amount, description, date and category are changed.
pub async fn update_expense_endpoint(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Query(query): Query<ListQuery>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    submit_expense_form(&state, &query, form.into_buffer(Some(expense_id)))
}
