//! Translates an [ExpenseFilter] into a range query on the expense table.

use rusqlite::Connection;

use crate::{
    Error,
    expense::{Expense, ExpenseFilter, core::map_expense_row},
};

/// Get the expenses dated within the filter's month, restricted to the
/// filter's category if it has one.
///
/// The category is compared after each row has been mapped to a [Category](crate::expense::Category),
/// so legacy labels and unknown values are filtered the same way they are displayed.
///
/// Expenses are returned in the order they were created.
///
/// # Errors
/// Returns [Error::SqlError] if the query could not be prepared or a row could not be mapped.
pub fn query_expenses(filter: &ExpenseFilter, connection: &Connection) -> Result<Vec<Expense>, Error> {
    let range = filter.month.range();

    // Dates are stored without a time, so comparing the calendar days of the
    // range bounds is equivalent to comparing the full timestamps.
    let mut expenses = connection
        .prepare(
            "SELECT id, amount, description, category, date, created_at, updated_at
             FROM expense
             WHERE date BETWEEN :start AND :end
             ORDER BY id ASC",
        )?
        .query_map(
            rusqlite::named_params! {
                ":start": range.start.date(),
                ":end": range.end.date(),
            },
            map_expense_row,
        )?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect::<Result<Vec<_>, Error>>()?;

    if let Some(category) = filter.category {
        expenses.retain(|expense| expense.category == category);
    }

    Ok(expenses)
}
