//! Defines the JSON endpoint for listing expenses.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::{
    Error,
    expense::{
        Category, Expense, ExpenseController, ExpenseFilter, ListQuery, state::ExpenseState,
    },
};

#[derive(Debug, Serialize)]
struct ExpenseList<'a> {
    month: String,
    category: Option<Category>,
    expenses: &'a [Expense],
    total: f64,
}

/// List the expenses for the month and category in the query string as JSON,
/// along with their total.
pub async fn get_expenses_json(
    State(state): State<ExpenseState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let mut controller = match state
        .today()
        .and_then(|today| ExpenseFilter::from_query(&query, today))
    {
        Ok(filter) => ExpenseController::new(filter),
        Err(error) => return error_json(error),
    };

    if let Err(error) = controller.list(&state.store()) {
        return error_json(error);
    }

    Json(ExpenseList {
        month: controller.filter().month.to_string(),
        category: controller.filter().category,
        expenses: controller.expenses(),
        total: controller.total(),
    })
    .into_response()
}

fn error_json(error: Error) -> Response {
    let description = error.describe();

    (
        description.status_code,
        Json(json!({
            "error": description.message,
            "details": description.details,
        })),
    )
        .into_response()
}
