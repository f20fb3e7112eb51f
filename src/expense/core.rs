//! Defines the core data models and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{Error, expense::Category};

// ============================================================================
// MODELS
// ============================================================================

/// The database ID of an expense.
pub type ExpenseId = i64;

/// An amount of money in dollars that is zero or greater.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// No money at all.
    pub const ZERO: Amount = Amount(0.0);

    /// Create an amount from a number of dollars.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `value` is negative, NaN or infinite.
    pub fn new(value: f64) -> Result<Self, Error> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidAmount(value))
        }
    }

    /// Create an amount without validation.
    ///
    /// Only use this for values that have already been validated, e.g. values
    /// read from the database which has a check constraint on amounts.
    pub fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    /// The amount in dollars.
    pub fn value(self) -> f64 {
        self.0
    }
}

/// A record of money spent.
///
/// To create a new `Expense`, use [Expense::build].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    /// The ID of the expense, assigned by the database.
    pub id: ExpenseId,
    /// How much was spent.
    pub amount: Amount,
    /// A text description of what the expense was for, may be empty.
    pub description: String,
    /// What kind of expense this is.
    pub category: Category,
    /// The day the money was spent.
    pub date: Date,
    /// When the expense was first recorded.
    pub created_at: OffsetDateTime,
    /// When the expense was last edited, `None` if it has never been edited.
    pub updated_at: Option<OffsetDateTime>,
}

impl Expense {
    /// Start building a new expense.
    ///
    /// Shortcut for [ExpenseBuilder] for discoverability.
    pub fn build(amount: Amount, date: Date) -> ExpenseBuilder {
        ExpenseBuilder {
            amount,
            date,
            description: String::new(),
            category: Category::default(),
        }
    }
}

/// The user editable fields of an [Expense].
///
/// Used both to create new expenses and to update existing ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBuilder {
    /// How much was spent.
    pub amount: Amount,
    /// The day the money was spent.
    pub date: Date,
    /// What the expense was for, may be empty.
    pub description: String,
    /// What kind of expense this is.
    pub category: Category,
}

impl ExpenseBuilder {
    /// Set the description for the expense.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category for the expense.
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database from a builder, stamped with `created_at`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn create_expense(
    builder: ExpenseBuilder,
    created_at: OffsetDateTime,
    connection: &Connection,
) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expense (amount, description, category, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, description, category, date, created_at, updated_at",
        )?
        .query_row(
            (
                builder.amount.value(),
                builder.description,
                builder.category.as_str(),
                builder.date,
                created_at,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "SELECT id, amount, description, category, date, created_at, updated_at
             FROM expense WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Overwrite the editable fields of the expense `id` with those in `builder`
/// and stamp it with `updated_at`.
///
/// The ID and creation time of the expense are left untouched.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingExpense] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    builder: ExpenseBuilder,
    updated_at: OffsetDateTime,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection
        .prepare(
            "UPDATE expense
             SET amount = ?1, description = ?2, category = ?3, date = ?4, updated_at = ?5
             WHERE id = ?6
             RETURNING id, amount, description, category, date, created_at, updated_at",
        )?
        .query_row(
            (
                builder.amount.value(),
                builder.description,
                builder.category.as_str(),
                builder.date,
                updated_at,
                id,
            ),
            map_expense_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingExpense,
            error => error.into(),
        })
}

/// Delete the expense `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingExpense] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount >= 0),
                description TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT 'Other',
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('expense', 0)",
        (),
    )?;

    // Covers the month range filter on the expenses page.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date_category ON expense(date, category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
///
/// A missing description maps to an empty string and a missing or unknown
/// category maps to [Category::Other].
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = Amount::new_unchecked(row.get(1)?);
    let description = row.get::<_, Option<String>>(2)?.unwrap_or_default();
    let category = Category::from_stored(row.get::<_, Option<String>>(3)?.as_deref());
    let date = row.get(4)?;
    let created_at = row.get(5)?;
    let updated_at = row.get(6)?;

    Ok(Expense {
        id,
        amount,
        description,
        category,
        date,
        created_at,
        updated_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::{date, datetime};

    use crate::{
        Error,
        db::initialize,
        expense::{Category, Expense},
    };

    use super::{
        Amount, create_expense, delete_expense, get_expense, map_expense_row, update_expense,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let created_at = datetime!(2024-03-01 09:30 UTC);

        let expense = create_expense(
            Expense::build(Amount::new_unchecked(12.3), date!(2024 - 03 - 01))
                .description("Lunch")
                .category(Category::Food),
            created_at,
            &conn,
        )
        .expect("Could not create expense");

        assert_eq!(expense.id, 1);
        assert_eq!(expense.amount, Amount::new_unchecked(12.3));
        assert_eq!(expense.description, "Lunch");
        assert_eq!(expense.category, Category::Food);
        assert_eq!(expense.date, date!(2024 - 03 - 01));
        assert_eq!(expense.created_at, created_at);
        assert_eq!(expense.updated_at, None);
    }

    #[test]
    fn create_uses_defaults() {
        let conn = get_test_connection();

        let expense = create_expense(
            Expense::build(Amount::ZERO, date!(2024 - 03 - 01)),
            datetime!(2024-03-01 09:30 UTC),
            &conn,
        )
        .expect("Could not create expense");

        assert_eq!(expense.description, "");
        assert_eq!(expense.category, Category::Other);
    }

    #[test]
    fn database_rejects_negative_amount() {
        let conn = get_test_connection();

        let result = create_expense(
            Expense::build(Amount::new_unchecked(-1.0), date!(2024 - 03 - 01)),
            datetime!(2024-03-01 09:30 UTC),
            &conn,
        );

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn get_returns_created_expense() {
        let conn = get_test_connection();
        let want = create_expense(
            Expense::build(Amount::new_unchecked(5.0), date!(2024 - 03 - 02)),
            datetime!(2024-03-02 10:00 UTC),
            &conn,
        )
        .unwrap();

        let got = get_expense(want.id, &conn);

        assert_eq!(got, Ok(want));
    }

    #[test]
    fn get_missing_expense_is_not_found() {
        let conn = get_test_connection();

        assert_eq!(get_expense(42, &conn), Err(Error::NotFound));
    }

    #[test]
    fn update_merges_editable_fields() {
        let conn = get_test_connection();
        let created_at = datetime!(2024-03-01 09:30 UTC);
        let updated_at = datetime!(2024-03-05 18:00 UTC);
        let original = create_expense(
            Expense::build(Amount::new_unchecked(12.3), date!(2024 - 03 - 01))
                .description("Lunch")
                .category(Category::Food),
            created_at,
            &conn,
        )
        .unwrap();

        let updated = update_expense(
            original.id,
            Expense::build(Amount::new_unchecked(15.0), date!(2024 - 03 - 02))
                .description("Dinner")
                .category(Category::Leisure),
            updated_at,
            &conn,
        )
        .expect("Could not update expense");

        assert_eq!(
            updated,
            Expense {
                id: original.id,
                amount: Amount::new_unchecked(15.0),
                description: "Dinner".to_owned(),
                category: Category::Leisure,
                date: date!(2024 - 03 - 02),
                created_at,
                updated_at: Some(updated_at),
            }
        );
        assert_eq!(get_expense(original.id, &conn), Ok(updated));
    }

    #[test]
    fn update_missing_expense_fails() {
        let conn = get_test_connection();

        let result = update_expense(
            1,
            Expense::build(Amount::ZERO, date!(2024 - 03 - 01)),
            datetime!(2024-03-05 18:00 UTC),
            &conn,
        );

        assert_eq!(result, Err(Error::UpdateMissingExpense));
    }

    #[test]
    fn delete_removes_expense() {
        let conn = get_test_connection();
        let expense = create_expense(
            Expense::build(Amount::new_unchecked(1.23), date!(2024 - 03 - 01)),
            datetime!(2024-03-01 09:30 UTC),
            &conn,
        )
        .unwrap();

        delete_expense(expense.id, &conn).expect("Could not delete expense");

        assert_eq!(get_expense(expense.id, &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_expense_fails() {
        let conn = get_test_connection();

        assert_eq!(delete_expense(1, &conn), Err(Error::DeleteMissingExpense));
    }

    #[test]
    fn map_row_applies_defaults_to_missing_fields() {
        let conn = Connection::open_in_memory().unwrap();

        let expense = conn
            .query_row(
                "SELECT 7, 12.5, NULL, 'Saúde', '2024-03-01', '2024-03-01T09:30:00Z', NULL",
                [],
                map_expense_row,
            )
            .expect("Could not map row");

        assert_eq!(expense.id, 7);
        assert_eq!(expense.description, "");
        assert_eq!(expense.category, Category::Health);
        assert_eq!(expense.date, date!(2024 - 03 - 01));
        assert_eq!(expense.updated_at, None);
    }
}
