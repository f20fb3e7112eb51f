//! Defines the route handler for the page that lists, filters and totals expenses.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    expense::{
        ExpenseController, ExpenseFilter, ListQuery, state::ExpenseState, views::expenses_page,
    },
};

/// Render the expenses for the month and category in the query string.
///
/// An invalid filter falls back to the current month and is reported in a
/// notice, as is a failure to load the expenses.
pub async fn get_expenses_page(
    State(state): State<ExpenseState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, Error> {
    let today = state.today()?;
    let (filter, filter_error) = match ExpenseFilter::from_query(&query, today) {
        Ok(filter) => (filter, None),
        Err(error) => {
            tracing::warn!("Invalid expense filter {query:?}: {error}");
            (ExpenseFilter::current_month(today), Some(error))
        }
    };

    let mut controller = ExpenseController::new(filter);
    // The controller logs failures and shows them as a notice on the page.
    let _ = controller.list(&state.store());

    if let Some(error) = filter_error {
        controller.notify(&error);
    }

    Ok(expenses_page(&controller).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::{Date, macros::{date, datetime}};

    use crate::{
        db::initialize,
        expense::{
            Amount, Category, Expense, ListQuery, create_expense, state::ExpenseState,
        },
        test_utils::{assert_content_type, assert_valid_html, parse_html_document},
    };

    use super::get_expenses_page;

    fn get_state() -> ExpenseState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        ExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn insert(state: &ExpenseState, amount: f64, date: Date, category: Category) {
        let connection = state.db_connection.lock().unwrap();
        create_expense(
            Expense::build(Amount::new_unchecked(amount), date).category(category),
            datetime!(2024-03-01 08:00 UTC),
            &connection,
        )
        .unwrap();
    }

    fn query(month: &str, category: &str) -> Query<ListQuery> {
        Query(ListQuery {
            month: Some(month.to_owned()),
            category: Some(category.to_owned()),
        })
    }

    async fn get_page(state: ExpenseState, query: Query<ListQuery>) -> Html {
        let response = get_expenses_page(State(state), query)
            .await
            .expect("Could not render expenses page");

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    fn row_count(html: &Html) -> usize {
        html.select(&Selector::parse("tr[data-expense-id]").unwrap())
            .count()
    }

    fn total_text(html: &Html) -> String {
        html.select(&Selector::parse("[data-total]").unwrap())
            .next()
            .expect("No total found")
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    #[tokio::test]
    async fn lists_expenses_in_month_with_total() {
        let state = get_state();
        insert(&state, 50.0, date!(2024 - 03 - 01), Category::Food);
        insert(&state, 20.0, date!(2024 - 03 - 31), Category::Leisure);
        insert(&state, 99.0, date!(2024 - 04 - 01), Category::Food);

        let html = get_page(state, query("2024-03", "")).await;

        assert_eq!(row_count(&html), 2);
        assert_eq!(total_text(&html), "$70.00");
    }

    #[tokio::test]
    async fn category_without_expenses_shows_zero_total() {
        let state = get_state();
        insert(&state, 50.0, date!(2024 - 03 - 01), Category::Food);
        insert(&state, 20.0, date!(2024 - 03 - 31), Category::Leisure);

        let html = get_page(state, query("2024-03", "Health")).await;

        assert_eq!(row_count(&html), 0);
        assert_eq!(total_text(&html), "$0.00");
    }

    #[tokio::test]
    async fn filter_form_keeps_selection() {
        let state = get_state();

        let html = get_page(state, query("2024-03", "Health")).await;

        let month = html
            .select(&Selector::parse("input[name=month]").unwrap())
            .next()
            .expect("No month input");
        assert_eq!(month.value().attr("value"), Some("2024-03"));
        let selected = html
            .select(&Selector::parse("select[name=category] option[selected]").unwrap())
            .next()
            .expect("No selected category");
        assert_eq!(selected.value().attr("value"), Some("Health"));
        let form = html
            .select(&Selector::parse("form#filter-form").unwrap())
            .next()
            .expect("No filter form");
        assert_eq!(form.value().attr("hx-sync"), Some("this:replace"));
    }

    #[tokio::test]
    async fn invalid_month_shows_notice() {
        let state = get_state();

        let html = get_page(state, query("2024-13", "")).await;

        let notice = html
            .select(&Selector::parse("[data-notice]").unwrap())
            .next()
            .expect("No notice found")
            .text()
            .collect::<String>();
        assert!(notice.contains("Invalid month"), "got notice {notice:?}");
    }

    #[tokio::test]
    async fn database_failure_shows_notice() {
        let state = get_state();
        state
            .db_connection
            .lock()
            .unwrap()
            .execute("DROP TABLE expense", ())
            .unwrap();

        let html = get_page(state, query("2024-03", "")).await;

        let notice_count = html
            .select(&Selector::parse("[data-notice]").unwrap())
            .count();
        assert_eq!(notice_count, 1);
    }
}
