//! The fixed set of expense categories.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// What an expense was for.
///
/// The set of categories is closed, new categories require a code change.
/// Categories are stored in the database by their canonical name, see [Category::as_str].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Groceries and eating out.
    Food,
    /// Getting around, e.g. fuel or bus fares.
    Transportation,
    /// Entertainment and hobbies.
    Leisure,
    /// Medical costs and pharmacy.
    Health,
    /// Courses and study materials.
    Education,
    /// Rent and utilities.
    Housing,
    /// Anything else.
    #[default]
    Other,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transportation,
        Category::Leisure,
        Category::Health,
        Category::Education,
        Category::Housing,
        Category::Other,
    ];

    /// The canonical name used for storage and in URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Leisure => "Leisure",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Housing => "Housing",
            Category::Other => "Other",
        }
    }

    /// The localized label used by older exports of expense data.
    fn legacy_label(self) -> &'static str {
        match self {
            Category::Food => "Alimentação",
            Category::Transportation => "Transporte",
            Category::Leisure => "Lazer",
            Category::Health => "Saúde",
            Category::Education => "Educação",
            Category::Housing => "Moradia",
            Category::Other => "Outros",
        }
    }

    /// Map a category read from storage, falling back to [Category::Other]
    /// for missing or unrecognised values.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::parse::<Category>) {
            Some(Ok(category)) => category,
            Some(Err(_)) => {
                tracing::warn!("Unknown category {value:?} in storage, using {}", Category::Other);
                Category::Other
            }
            None => Category::Other,
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse a canonical category name or a legacy label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s || category.legacy_label() == s)
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
