//! The page to display when an internal server error occurs.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// The description and suggested fix shown on the 500 page.
pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl InternalServerError<'_> {
    fn into_html(self) -> Html<String> {
        Html(error_view("Internal Server Error", "500", self.description, self.fix).into_string())
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.into_html()).into_response()
    }
}

/// Route handler for the internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}
