//! Defines the route handler for the page for creating a new expense.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    Error,
    expense::{
        ExpenseController, ExpenseFilter, FormState, ListQuery, state::ExpenseState,
        views::expense_form_page,
    },
};

/// Render a blank expense form dated today.
///
/// The query string holds the filter of the list to return to after saving.
pub async fn get_new_expense_page(
    State(state): State<ExpenseState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, Error> {
    let today = state.today()?;
    let mut controller = ExpenseController::new(return_filter(&query, today));

    controller.begin_create(today);

    Ok(render_form(&controller))
}

/// The filter of the list to return to, falling back to the current month if
/// the query string is invalid.
pub(super) fn return_filter(query: &ListQuery, today: time::Date) -> ExpenseFilter {
    ExpenseFilter::from_query(query, today).unwrap_or_else(|error| {
        tracing::warn!("Invalid return filter {query:?}: {error}");
        ExpenseFilter::current_month(today)
    })
}

/// Render the open form, or go back to the list if the form is closed.
pub(super) fn render_form(controller: &ExpenseController) -> Response {
    match controller.form() {
        FormState::Open(buffer) => expense_form_page(buffer, controller.filter()).into_response(),
        FormState::Idle => Redirect::to(&controller.filter().list_url()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use scraper::Selector;
    use time::OffsetDateTime;

    use crate::{
        db::initialize,
        endpoints,
        expense::{ExpenseController, ExpenseFilter, ListQuery, state::ExpenseState},
        test_utils::{
            assert_content_type, assert_form_input, assert_form_input_with_value,
            assert_form_select_with_value, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_valid_html, must_get_form, parse_html_document,
        },
    };

    use super::{get_new_expense_page, render_form};

    fn get_state() -> ExpenseState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        ExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn render_page() {
        let query = ListQuery {
            month: Some("2024-03".to_owned()),
            category: Some("Food".to_owned()),
        };

        let response = get_new_expense_page(State(get_state()), Query(query))
            .await
            .expect("Could not render page");

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &format!("{}?month=2024-03&category=Food", endpoints::EXPENSES_API),
            "hx-post",
        );
        assert_form_input_with_value(&form, "amount", "number", "0.00");
        let today = OffsetDateTime::now_utc().date().to_string();
        assert_form_input_with_value(&form, "date", "date", &today);
        assert_form_input(&form, "description", "text", false);
        assert_form_select_with_value(&form, "category", "Other");
        assert_form_submit_button_with_text(&form, "Add Expense");

        let cancel = form
            .select(&Selector::parse("a").unwrap())
            .next()
            .expect("No cancel link");
        assert_eq!(
            cancel.value().attr("href"),
            Some(format!("{}?month=2024-03&category=Food", endpoints::EXPENSES_VIEW).as_str())
        );
    }

    #[test]
    fn closed_form_redirects_to_list() {
        let filter = ExpenseFilter::new("2024-03".parse().unwrap(), None);
        let controller = ExpenseController::new(filter.clone());

        let response = render_form(&controller);

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            filter.list_url().as_str()
        );
    }
}
