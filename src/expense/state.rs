//! The state shared by the expense route handlers.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;
use time::Date;

use crate::{AppState, Error, expense::SQLiteExpenseStore, timezone::local_today};

/// The state needed to list and manage expenses.
#[derive(Debug, Clone)]
pub struct ExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl ExpenseState {
    /// A store backed by the shared database connection.
    pub fn store(&self) -> SQLiteExpenseStore {
        SQLiteExpenseStore::new(self.db_connection.clone())
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> Result<Date, Error> {
        local_today(&self.local_timezone)
    }
}
