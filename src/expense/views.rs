//! Markup for the expense list, filter and form.

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints::{self, format_endpoint},
    expense::{Category, Expense, ExpenseController, ExpenseFilter, FormBuffer, Notice},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CATEGORY_BADGE_STYLE,
        FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        dollar_input_styles, format_currency, loading_spinner,
    },
    navigation::NavBar,
};

/// The max number of graphemes to display in the expense table rows before
/// truncating.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// The ID of the element swapped when the filter changes.
pub const EXPENSES_CONTENT_ID: &str = "expenses-content";
/// The ID of the element swapped after an expense is deleted.
pub const EXPENSE_LIST_ID: &str = "expense-list";

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:zero]/[month repr:numerical padding:zero]/[year]");

fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn truncate_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        (truncated + "...", Some(description))
    }
}

/// The full expenses page: filter, notice, list and total.
pub fn expenses_page(controller: &ExpenseController) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();
    let filter = controller.filter();
    let new_expense_url = filter.with_query(endpoints::NEW_EXPENSE_VIEW);

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-4"
            {
                div class="flex items-center justify-between"
                {
                    h1 class="text-2xl font-bold" { "Expenses" }

                    a href=(new_expense_url) class=(LINK_STYLE) { "New Expense" }
                }

                (filter_form(filter))

                (expenses_content(controller))
            }
        }
    };

    base("Expenses", &[], &content)
}

fn filter_form(filter: &ExpenseFilter) -> Markup {
    let content_selector = format!("#{EXPENSES_CONTENT_ID}");

    html! {
        form
            id="filter-form"
            action=(endpoints::EXPENSES_VIEW)
            method="get"
            hx-get=(endpoints::EXPENSES_VIEW)
            hx-trigger="change"
            hx-select=(content_selector)
            hx-target=(content_selector)
            hx-swap="outerHTML"
            hx-push-url="true"
            hx-sync="this:replace"
            class="flex flex-wrap items-end gap-4"
        {
            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                input
                    name="month"
                    id="month"
                    type="month"
                    value=(filter.month)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    name="category"
                    id="category"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[filter.category.is_none()] { "All categories" }

                    @for category in Category::ALL {
                        option
                            value=(category.as_str())
                            selected[filter.category == Some(category)]
                        {
                            (category)
                        }
                    }
                }
            }

            noscript
            {
                button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Apply" }
            }
        }
    }
}

/// The part of the page that changes with the filter: the notice and the list.
pub fn expenses_content(controller: &ExpenseController) -> Markup {
    html! {
        div id=(EXPENSES_CONTENT_ID) class="space-y-4"
        {
            @if let Some(notice) = controller.notice() {
                (notice_view(notice))
            }

            (expense_list(controller.expenses(), controller.total(), controller.filter()))
        }
    }
}

fn notice_view(notice: &Notice) -> Markup {
    html! {
        div
            role="status"
            data-notice="true"
            class="p-4 text-sm text-yellow-800 rounded-lg bg-yellow-50
                dark:bg-gray-800 dark:text-yellow-300"
        {
            p class="font-semibold" { (notice.message) }
            @if !notice.details.is_empty() {
                p { (notice.details) }
            }
        }
    }
}

/// The table of expenses with the total, swapped in place after a delete.
pub fn expense_list(expenses: &[Expense], total: f64, filter: &ExpenseFilter) -> Markup {
    html! {
        div id=(EXPENSE_LIST_ID) class="relative overflow-x-auto shadow-md rounded"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        (expense_row(expense, filter))
                    }

                    @if expenses.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="5" class={ (TABLE_CELL_STYLE) " text-center" }
                            {
                                "No expenses for this month."
                            }
                        }
                    }
                }

                tfoot
                {
                    tr class="font-semibold text-gray-900 dark:text-white"
                    {
                        th scope="row" colspan="3" class=(TABLE_CELL_STYLE) { "Total" }
                        td class={ (TABLE_CELL_STYLE) " text-right" } data-total="true"
                        {
                            (format_currency(total))
                        }
                        td {}
                    }
                }
            }
        }
    }
}

fn expense_row(expense: &Expense, filter: &ExpenseFilter) -> Markup {
    let (description, tooltip) = truncate_description(&expense.description);
    let edit_url = filter.with_query(&format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id));
    let delete_url = filter.with_query(&format_endpoint(endpoints::EXPENSE, expense.id));
    let list_selector = format!("#{EXPENSE_LIST_ID}");

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
        {
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(expense.date) { (format_date(expense.date)) }
            }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
            }
            td class={ (TABLE_CELL_STYLE) " text-right" } { (format_currency(expense.amount.value())) }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        type="button"
                        hx-delete=(delete_url)
                        hx-target=(list_selector)
                        hx-swap="outerHTML"
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

/// The page with the form for creating or editing an expense.
///
/// The form submits to the create or update endpoint depending on whether
/// `buffer` has an ID, and returns to the list showing `filter` afterwards.
pub fn expense_form_page(buffer: &FormBuffer, filter: &ExpenseFilter) -> Markup {
    let active_endpoint = if buffer.is_edit() {
        endpoints::EDIT_EXPENSE_VIEW
    } else {
        endpoints::NEW_EXPENSE_VIEW
    };
    let nav_bar = NavBar::new(active_endpoint).into_html();
    let spinner = loading_spinner();
    let (title, submit_label) = match buffer.id {
        Some(_) => ("Edit Expense", "Save Changes"),
        None => ("New Expense", "Add Expense"),
    };
    let create_url = buffer
        .id
        .is_none()
        .then(|| filter.with_query(endpoints::EXPENSES_API));
    let update_url = buffer
        .id
        .map(|id| filter.with_query(&format_endpoint(endpoints::EXPENSE, id)));
    let amount = format!("{:.2}", buffer.amount);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=[create_url]
                hx-put=[update_url]
                hx-target-error="#alert-container"
                hx-disabled-elt="find button[type=submit]"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { (title) }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    // w-full needed to ensure input takes the full width when prefilled with a value
                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            id="amount"
                            type="number"
                            step="0.01"
                            min="0"
                            placeholder="0.00"
                            required
                            autofocus
                            value=(amount)
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Description"
                        value=(buffer.description)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        required
                        value=(buffer.date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select
                        name="category"
                        id="category"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in Category::ALL {
                            option
                                value=(category.as_str())
                                selected[buffer.category == category.as_str()]
                            {
                                (category)
                            }
                        }
                    }
                }

                button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="htmx-indicator" { (spinner) }
                    (submit_label)
                }

                a href=(filter.list_url()) class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
            }
        }
    };

    base(title, &[dollar_input_styles()], &content)
}
