//! Defines the expense store trait and its SQLite implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    expense::{
        Expense, ExpenseBuilder, ExpenseFilter, ExpenseId,
        core::{create_expense, delete_expense, get_expense, update_expense},
        query::query_expenses,
    },
};

/// Handles the creation, retrieval, modification and deletion of expenses.
pub trait ExpenseStore {
    /// Create a new expense in the store, stamped with `created_at`.
    fn create(
        &mut self,
        builder: ExpenseBuilder,
        created_at: OffsetDateTime,
    ) -> Result<Expense, Error>;

    /// Retrieve an expense from the store.
    fn get(&self, id: ExpenseId) -> Result<Expense, Error>;

    /// Replace the editable fields of the expense `id` and stamp it with `updated_at`.
    fn update(
        &mut self,
        id: ExpenseId,
        builder: ExpenseBuilder,
        updated_at: OffsetDateTime,
    ) -> Result<Expense, Error>;

    /// Remove the expense `id` from the store.
    fn delete(&mut self, id: ExpenseId) -> Result<(), Error>;

    /// Retrieve the expenses selected by `filter` in store order.
    fn query(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, Error>;
}

/// Stores expenses in a SQLite database.
///
/// The database lock is held for the duration of a single statement.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    fn create(
        &mut self,
        builder: ExpenseBuilder,
        created_at: OffsetDateTime,
    ) -> Result<Expense, Error> {
        let connection = self.lock()?;
        create_expense(builder, created_at, &connection)
    }

    fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        let connection = self.lock()?;
        get_expense(id, &connection)
    }

    fn update(
        &mut self,
        id: ExpenseId,
        builder: ExpenseBuilder,
        updated_at: OffsetDateTime,
    ) -> Result<Expense, Error> {
        let connection = self.lock()?;
        update_expense(id, builder, updated_at, &connection)
    }

    fn delete(&mut self, id: ExpenseId) -> Result<(), Error> {
        let connection = self.lock()?;
        delete_expense(id, &connection)
    }

    fn query(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, Error> {
        let connection = self.lock()?;
        query_expenses(filter, &connection)
    }
}
