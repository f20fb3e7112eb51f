//! Defines the route handler for the page for editing an existing expense.

use axum::{
    extract::{Path, Query, State},
    response::Response,
};

use crate::{
    Error,
    expense::{
        ExpenseController, ExpenseId, ExpenseStore, ListQuery,
        create_page::{render_form, return_filter},
        state::ExpenseState,
    },
};

/// Render the expense form pre-populated with the expense `expense_id`.
///
/// Responds with the 404 page if the expense does not exist.
pub async fn get_edit_expense_page(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Query(query): Query<ListQuery>,
) -> Result<Response, Error> {
    let today = state.today()?;
    let expense = state
        .store()
        .get(expense_id)
        .inspect_err(|error| tracing::error!("could not get expense {expense_id}: {error}"))?;

    let mut controller = ExpenseController::new(return_filter(&query, today));
    controller.begin_edit(&expense);

    Ok(render_form(&controller))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::{date, datetime};

    use crate::{
        Error,
        db::initialize,
        endpoints::{self, format_endpoint},
        expense::{
            Amount, Category, Expense, ListQuery, create_expense, state::ExpenseState,
        },
        test_utils::{
            assert_form_input_with_value, assert_form_select_with_value,
            assert_form_submit_button_with_text, assert_hx_endpoint, assert_valid_html,
            must_get_form, parse_html_document,
        },
    };

    use super::get_edit_expense_page;

    fn get_state() -> ExpenseState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        ExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn render_page_with_expense() {
        let state = get_state();
        let expense = create_expense(
            Expense::build(Amount::new_unchecked(12.3), date!(2024 - 03 - 02))
                .description("Bus fare")
                .category(Category::Transportation),
            datetime!(2024-03-02 08:00 UTC),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = get_edit_expense_page(
            State(state),
            Path(expense.id),
            Query(ListQuery {
                month: Some("2024-03".to_owned()),
                category: None,
            }),
        )
        .await
        .expect("Could not render page");

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &format!("{}?month=2024-03", format_endpoint(endpoints::EXPENSE, expense.id)),
            "hx-put",
        );
        assert_form_input_with_value(&form, "amount", "number", "12.30");
        assert_form_input_with_value(&form, "date", "date", "2024-03-02");
        assert_form_select_with_value(&form, "category", "Transportation");
        assert_form_submit_button_with_text(&form, "Save Changes");
        let description = form
            .select(&scraper::Selector::parse("input[name=description]").unwrap())
            .next()
            .expect("No description input");
        assert_eq!(description.value().attr("value"), Some("Bus fare"));
    }

    #[tokio::test]
    async fn missing_expense_is_not_found() {
        let result = get_edit_expense_page(
            State(get_state()),
            Path(42),
            Query(ListQuery::default()),
        )
        .await;

        let error = result.expect_err("want an error for a missing expense");
        assert_eq!(error, Error::NotFound);
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }
}
