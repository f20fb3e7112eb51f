//! A small web app for keeping track of personal expenses.
//!
//! Expenses are stored in SQLite and browsed one month at a time, optionally
//! narrowed down to a single category. The library serves server-rendered HTML
//! pages driven by HTMX, plus a JSON view of the filtered expense list.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod db;
mod endpoints;
mod error;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use expense::{
    Amount, Category, Expense, ExpenseBuilder, ExpenseController, ExpenseFilter, ExpenseId,
    ExpenseStore, FormBuffer, FormState, ListOutcome, ListRequest, MonthRange, Notice,
    SQLiteExpenseStore, YearMonth, create_expense, total,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
