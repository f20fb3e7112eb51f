//! Expense tracking.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model, its `Category` and `ExpenseBuilder` for creating expenses
//! - Database functions and the `ExpenseStore` for storing, querying and managing expenses
//! - The month and category filter and the query that applies it
//! - The `ExpenseController` that holds the list, filter and form state
//! - View handlers for the expense pages and endpoints

mod api;
mod category;
mod controller;
mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod expenses_page;
mod filter;
mod form;
mod query;
mod state;
mod store;
mod views;

pub use api::get_expenses_json;
pub use category::Category;
pub use controller::{
    ExpenseController, FormBuffer, FormState, ListOutcome, ListRequest, Notice, total,
};
pub use self::core::{
    Amount, Expense, ExpenseBuilder, ExpenseId, create_expense, create_expense_table,
};
pub use create_endpoint::create_expense_endpoint;
pub use create_page::get_new_expense_page;
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_endpoint::update_expense_endpoint;
pub use edit_page::get_edit_expense_page;
pub use expenses_page::get_expenses_page;
pub use filter::{ExpenseFilter, ListQuery, MonthRange, YearMonth};
pub use store::{ExpenseStore, SQLiteExpenseStore};
