//! Availability status of a book

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of availability states
///
/// The canonical display string of each variant is what gets stored on disk
/// and shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum BookStatus {
    InStock,
    Borrowed,
}

impl BookStatus {
    /// Every variant, in declaration order
    pub const ALL: [BookStatus; 2] = [BookStatus::InStock, BookStatus::Borrowed];

    /// Returns the canonical display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "в наличии",
            Self::Borrowed => "выдана",
        }
    }

    /// Returns the canonical strings of all variants
    ///
    /// ```
    /// use bookshelf_core::BookStatus;
    /// assert_eq!(BookStatus::values(), vec!["в наличии", "выдана"]);
    /// ```
    pub fn values() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }

    /// Length in characters of the longest display string
    pub fn max_display_len() -> usize {
        Self::ALL
            .iter()
            .map(|s| s.as_str().chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Looks up a variant by its display string, ignoring case
    pub fn from_value(value: &str) -> Result<Self, ValidationError> {
        let wanted = value.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == wanted)
            .ok_or_else(|| {
                ValidationError::with_value(
                    "status",
                    format!(
                        "Неверное значение: '{}'. Допустимые значения: {}",
                        wanted,
                        Self::values().join(", ")
                    ),
                    value,
                )
                .with_allowed(Self::values())
            })
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_value(s)
    }
}

impl From<BookStatus> for &'static str {
    fn from(status: BookStatus) -> Self {
        status.as_str()
    }
}

impl TryFrom<String> for BookStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}
