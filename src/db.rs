//! Database initialization.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, expense::create_expense_table};

/// Create the tables for the domain models in a single transaction.
///
/// Safe to call on an existing database, tables that already exist are left untouched.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("first initialization failed");
        initialize(&connection).expect("second initialization failed");
    }
}
