//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, timezone::get_local_offset};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the timezone is not valid or the database cannot be initialized.
    pub fn new(db_connection: Connection, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            tracing::error!("Invalid timezone {local_timezone}");
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        initialize(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
