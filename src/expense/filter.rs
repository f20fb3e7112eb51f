//! The month and category filter for the expense list.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, OffsetDateTime, macros::time};

use crate::{Error, endpoints, expense::Category};

/// A calendar month in a specific year, e.g. March 2024.
///
/// Parses from and displays as `YYYY-MM`, the format used by HTML month inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first_day: Date,
}

impl YearMonth {
    /// Create the month `month` of `year`.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `year` is outside the supported range of dates.
    pub fn new(year: i32, month: Month) -> Result<Self, Error> {
        Date::from_calendar_date(year, month, 1)
            .map(|first_day| Self { first_day })
            .map_err(|_| Error::InvalidMonth(format!("{year:04}-{:02}", month as u8)))
    }

    /// The month that `date` falls in.
    pub fn containing(date: Date) -> Self {
        Self {
            first_day: date - Duration::days(i64::from(date.day()) - 1),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The month of the year.
    pub fn month(&self) -> Month {
        self.first_day.month()
    }

    /// The first calendar day of the month.
    pub fn first_day(&self) -> Date {
        self.first_day
    }

    /// The last calendar day of the month, accounting for leap years.
    pub fn last_day(&self) -> Date {
        let days_in_month = time::util::days_in_month(self.month(), self.year());

        self.first_day + Duration::days(i64::from(days_in_month) - 1)
    }

    /// The inclusive UTC time range covering every day in the month.
    pub fn range(&self) -> MonthRange {
        MonthRange {
            start: self.first_day.midnight().assume_utc(),
            end: self.last_day().with_time(time!(23:59:59)).assume_utc(),
        }
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    /// Parse a month in the format `YYYY-MM`, e.g. "2024-03".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_owned());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;

        if year.len() != 4
            || month.len() != 2
            || !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month
            .parse::<u8>()
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .ok_or_else(invalid)?;

        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month() as u8)
    }
}

/// An inclusive time range from the first instant of a month to the last
/// second of the month, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    /// The first day of the month at 00:00:00 UTC.
    pub start: OffsetDateTime,
    /// The last day of the month at 23:59:59 UTC.
    pub end: OffsetDateTime,
}

impl MonthRange {
    /// Whether an expense dated `date` falls in the range.
    ///
    /// Expense dates have no time component so only the calendar day is compared.
    pub fn contains(&self, date: Date) -> bool {
        (self.start.date()..=self.end.date()).contains(&date)
    }
}

/// The raw month and category query parameters for the expense list.
///
/// Empty strings are treated the same as missing parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// The month to list in the format `YYYY-MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// The category to list, empty for all categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Which expenses to list: a single month and, optionally, a single category.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFilter {
    /// Only list expenses dated in this month.
    pub month: YearMonth,
    /// Only list expenses in this category, `None` lists every category.
    pub category: Option<Category>,
}

impl ExpenseFilter {
    /// Create a filter for `month`, narrowed to `category` if given.
    pub fn new(month: YearMonth, category: Option<Category>) -> Self {
        Self { month, category }
    }

    /// The filter for every expense in the month containing `today`.
    pub fn current_month(today: Date) -> Self {
        Self::new(YearMonth::containing(today), None)
    }

    /// Parse the filter from query parameters.
    ///
    /// A missing or empty month defaults to the month containing `today`,
    /// a missing or empty category selects all categories.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] or [Error::InvalidCategory] if a parameter
    /// is present but malformed.
    pub fn from_query(query: &ListQuery, today: Date) -> Result<Self, Error> {
        let month = match non_empty(&query.month) {
            Some(month) => month.parse()?,
            None => YearMonth::containing(today),
        };

        let category = non_empty(&query.category)
            .map(str::parse::<Category>)
            .transpose()?;

        Ok(Self { month, category })
    }

    /// The query parameters that select this filter.
    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            month: Some(self.month.to_string()),
            category: self.category.map(|category| category.as_str().to_owned()),
        }
    }

    /// Append this filter's query string to `path`.
    pub fn with_query(&self, path: &str) -> String {
        match serde_urlencoded::to_string(self.to_query()) {
            Ok(query) if !query.is_empty() => format!("{path}?{query}"),
            Ok(_) => path.to_owned(),
            Err(error) => {
                tracing::error!("Could not encode filter {self:?} as a query string: {error}");
                path.to_owned()
            }
        }
    }

    /// The URL of the expense list page showing this filter.
    pub fn list_url(&self) -> String {
        self.with_query(endpoints::EXPENSES_VIEW)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}
