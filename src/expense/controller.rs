//! The form and list controller for the expenses page.
//!
//! [ExpenseController] owns the UI state: the active filter, the listed
//! expenses, the form buffer and the last user-visible notice. Every state
//! change goes through its methods, which talk to an [ExpenseStore].

use time::{Date, OffsetDateTime};

use crate::{
    Error,
    error::ErrorDescription,
    expense::{Amount, Category, Expense, ExpenseBuilder, ExpenseFilter, ExpenseId, ExpenseStore},
};

/// The sum of the amounts of `expenses`, zero if there are none.
pub fn total(expenses: &[Expense]) -> f64 {
    expenses
        .iter()
        .fold(0.0, |sum, expense| sum + expense.amount.value())
}

/// The unsaved contents of the expense form.
///
/// Values are kept as entered so that a failed submission can be retried
/// without the user retyping anything.
#[derive(Debug, Clone, PartialEq)]
pub struct FormBuffer {
    /// The expense being edited, `None` when creating a new expense.
    pub id: Option<ExpenseId>,
    /// The amount as entered, validated on submit.
    pub amount: f64,
    /// What the expense was for, may be empty.
    pub description: String,
    /// The day the money was spent.
    pub date: Date,
    /// The category as entered, an empty string selects the default category.
    pub category: String,
}

impl FormBuffer {
    /// A blank form for a new expense dated `today`.
    pub fn empty(today: Date) -> Self {
        Self {
            id: None,
            amount: 0.0,
            description: String::new(),
            date: today,
            category: Category::default().as_str().to_owned(),
        }
    }

    /// A form pre-populated with the fields of `expense`.
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            id: Some(expense.id),
            amount: expense.amount.value(),
            description: expense.description.clone(),
            date: expense.date,
            category: expense.category.as_str().to_owned(),
        }
    }

    /// Whether the form edits an existing expense.
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Validate the buffer.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] or [Error::InvalidCategory] if a field is invalid.
    pub fn to_builder(&self) -> Result<ExpenseBuilder, Error> {
        let amount = Amount::new(self.amount)?;
        let category = match self.category.trim() {
            "" => Category::default(),
            category => category.parse()?,
        };

        Ok(Expense::build(amount, self.date)
            .description(&self.description)
            .category(category))
    }
}

/// Whether the expense form is shown.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    /// No form is open.
    Idle,
    /// The form is open for creating or editing an expense.
    Open(FormBuffer),
}

/// An error message shown to the user after an operation failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    /// A short summary of what went wrong.
    pub message: String,
    /// What the user can do about it.
    pub details: String,
}

impl From<&Error> for Notice {
    fn from(error: &Error) -> Self {
        let ErrorDescription {
            message, details, ..
        } = error.describe();

        Self { message, details }
    }
}

/// A request to refresh the expense list.
///
/// Requests are numbered in the order they were issued so that a response to
/// an outdated request can be recognised and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
    /// Increases by one with every request issued by a controller.
    pub sequence: u64,
    /// The filter to list expenses with.
    pub filter: ExpenseFilter,
}

/// What happened to the response to a [ListRequest].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    /// The response replaced the listed expenses.
    Applied,
    /// A newer request had been issued so the response was dropped.
    Discarded,
}

/// Holds the state of the expenses page and orchestrates changes to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseController {
    filter: ExpenseFilter,
    expenses: Vec<Expense>,
    form: FormState,
    latest_sequence: u64,
    notice: Option<Notice>,
}

impl ExpenseController {
    /// Create a controller with an empty list and a closed form.
    pub fn new(filter: ExpenseFilter) -> Self {
        Self {
            filter,
            expenses: Vec::new(),
            form: FormState::Idle,
            latest_sequence: 0,
            notice: None,
        }
    }

    /// The filter used for the next list request.
    pub fn filter(&self) -> &ExpenseFilter {
        &self.filter
    }

    /// The expenses from the most recent applied list response.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Whether the form is open and what it contains.
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// The error from the last failed operation, cleared by a successful list.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The total of the listed expenses.
    pub fn total(&self) -> f64 {
        total(&self.expenses)
    }

    /// Change the filter and issue a request for the matching expenses.
    pub fn set_filter(&mut self, filter: ExpenseFilter) -> ListRequest {
        self.filter = filter;
        self.request_list()
    }

    /// Issue a request for the expenses matching the current filter.
    pub fn request_list(&mut self) -> ListRequest {
        self.latest_sequence += 1;

        ListRequest {
            sequence: self.latest_sequence,
            filter: self.filter.clone(),
        }
    }

    /// Apply the response to the list request numbered `sequence`.
    ///
    /// Responses to anything but the latest request are discarded. On failure
    /// the previous list is kept and a notice is shown.
    ///
    /// # Errors
    /// Returns the error in `result` if it belongs to the latest request.
    pub fn receive_list(
        &mut self,
        sequence: u64,
        result: Result<Vec<Expense>, Error>,
    ) -> Result<ListOutcome, Error> {
        if sequence < self.latest_sequence {
            tracing::debug!(
                "Discarding list response {sequence}, latest request is {}",
                self.latest_sequence
            );
            return Ok(ListOutcome::Discarded);
        }

        match result {
            Ok(expenses) => {
                self.expenses = expenses;
                self.notice = None;
                Ok(ListOutcome::Applied)
            }
            Err(error) => Err(self.record_failure("list expenses", error)),
        }
    }

    /// Run `request` against `store` and apply the response.
    ///
    /// # Errors
    /// Returns an error if the store query fails, see [ExpenseController::receive_list].
    pub fn fulfil<S: ExpenseStore>(
        &mut self,
        store: &S,
        request: ListRequest,
    ) -> Result<ListOutcome, Error> {
        let result = store.query(&request.filter);
        self.receive_list(request.sequence, result)
    }

    /// Refresh the list with the expenses matching the current filter.
    ///
    /// # Errors
    /// Returns an error if the store query fails.
    pub fn list<S: ExpenseStore>(&mut self, store: &S) -> Result<ListOutcome, Error> {
        let request = self.request_list();
        self.fulfil(store, request)
    }

    /// Open a blank form for a new expense.
    pub fn begin_create(&mut self, today: Date) {
        self.open_form(FormBuffer::empty(today));
    }

    /// Open the form pre-populated with `expense`.
    pub fn begin_edit(&mut self, expense: &Expense) {
        self.open_form(FormBuffer::from_expense(expense));
    }

    /// Open the form with the contents of `buffer`, e.g. values submitted by a browser.
    pub fn open_form(&mut self, buffer: FormBuffer) {
        self.form = FormState::Open(buffer);
    }

    /// Close the form and discard any unsaved input.
    pub fn cancel(&mut self) {
        self.form = FormState::Idle;
    }

    /// Save the open form, creating or updating an expense stamped with `now`.
    ///
    /// On success the form is closed and a request to refresh the list is
    /// returned. On failure the form stays open with its contents unchanged.
    ///
    /// # Errors
    /// Returns [Error::FormNotOpen] if no form is open, a validation error
    /// if the form contents are invalid, or any error from the store.
    pub fn submit<S: ExpenseStore>(
        &mut self,
        store: &mut S,
        now: OffsetDateTime,
    ) -> Result<ListRequest, Error> {
        let FormState::Open(buffer) = &self.form else {
            return Err(self.record_failure("submit expense form", Error::FormNotOpen));
        };

        let result = buffer.to_builder().and_then(|builder| match buffer.id {
            Some(id) => store.update(id, builder, now),
            None => store.create(builder, now),
        });

        match result {
            Ok(expense) => {
                tracing::info!("Saved expense {}", expense.id);
                self.form = FormState::Idle;
                self.notice = None;
                Ok(self.request_list())
            }
            Err(error) => Err(self.record_failure("save expense", error)),
        }
    }

    /// Delete the expense `id` straight away and request a refreshed list.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingExpense] if the expense does not exist, or any error from the store.
    pub fn delete<S: ExpenseStore>(
        &mut self,
        store: &mut S,
        id: ExpenseId,
    ) -> Result<ListRequest, Error> {
        match store.delete(id) {
            Ok(()) => {
                tracing::info!("Deleted expense {id}");
                self.notice = None;
                Ok(self.request_list())
            }
            Err(error) => Err(self.record_failure("delete expense", error)),
        }
    }

    /// Show a notice for `error` without changing anything else.
    pub fn notify(&mut self, error: &Error) {
        self.notice = Some(Notice::from(error));
    }

    fn record_failure(&mut self, action: &str, error: Error) -> Error {
        tracing::error!("Could not {action}: {error}");
        self.notify(&error);
        error
    }
}
