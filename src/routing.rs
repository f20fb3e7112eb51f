//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_edit_expense_page,
        get_expenses_json, get_expenses_page, get_new_expense_page, update_expense_endpoint,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::NEW_EXPENSE_VIEW, get(get_new_expense_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::EXPENSES_API,
            get(get_expenses_json).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            put(update_expense_endpoint).delete(delete_expense_endpoint),
        );

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the expenses page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EXPENSES_VIEW)
}
