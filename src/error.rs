//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An amount that is negative, NaN or infinite was used for an expense.
    #[error("{0} is not a valid amount, amounts must be a number that is zero or greater")]
    InvalidAmount(f64),

    /// A string that does not name one of the fixed expense categories.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(String),

    /// A month filter that is not in the format `YYYY-MM`.
    #[error("\"{0}\" is not a valid month, expected the format YYYY-MM")]
    InvalidMonth(String),

    /// The form was submitted while it was not open.
    ///
    /// The controller must be given a form buffer with
    /// [begin_create](crate::expense::ExpenseController::begin_create),
    /// [begin_edit](crate::expense::ExpenseController::begin_edit) or
    /// [open_form](crate::expense::ExpenseController::open_form) before submitting.
    #[error("there is no open form to submit")]
    FormNotOpen,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an expense that does not exist
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

/// A user facing description of an [Error].
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDescription {
    /// The HTTP status code that best matches the error.
    pub status_code: StatusCode,
    /// A short summary of what went wrong.
    pub message: String,
    /// What the user can do about it.
    pub details: String,
}

impl Error {
    /// Describe the error in terms that can be shown to the user.
    ///
    /// Errors that are not caused by user input get a generic description,
    /// the specifics should only be logged on the server.
    pub fn describe(&self) -> ErrorDescription {
        let (status_code, message, details) = match self {
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                "Invalid amount",
                format!("{amount} is not a valid amount. Enter a number that is zero or greater."),
            ),
            Error::InvalidCategory(category) => (
                StatusCode::BAD_REQUEST,
                "Invalid category",
                format!("\"{category}\" is not one of the available categories."),
            ),
            Error::InvalidMonth(month) => (
                StatusCode::BAD_REQUEST,
                "Invalid month",
                format!("\"{month}\" is not a valid month. Use the format YYYY-MM, e.g. 2024-03."),
            ),
            Error::FormNotOpen => (
                StatusCode::BAD_REQUEST,
                "Nothing to save",
                "Open the form for a new or existing expense and try again.".to_owned(),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "Not found",
                "The expense could not be found.".to_owned(),
            ),
            Error::UpdateMissingExpense => (
                StatusCode::NOT_FOUND,
                "Could not update expense",
                "The expense could not be found.".to_owned(),
            ),
            Error::DeleteMissingExpense => (
                StatusCode::NOT_FOUND,
                "Could not delete expense",
                "The expense could not be found. \
                Try refreshing the page to see if the expense has already been deleted."
                    .to_owned(),
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid Timezone Settings",
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            Error::SqlError(_) | Error::DatabaseLockError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.".to_owned(),
            ),
        };

        ErrorDescription {
            status_code,
            message: message.to_owned(),
            details,
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let ErrorDescription {
            status_code,
            message,
            details,
        } = self.describe();

        (status_code, Alert::Error { message, details }.into_html()).into_response()
    }
}
