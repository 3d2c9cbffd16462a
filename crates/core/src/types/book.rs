//! Book domain model

use crate::error::{AppError, Result, ValidationError};
use crate::types::BookStatus;
use crate::validation;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Unique identifier for a book
///
/// Identifiers are positive and never reused within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(NonZeroU32);

impl BookId {
    /// Creates a BookId, returning `None` for zero
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// Returns the raw identifier
    pub fn get(&self) -> u32 {
        self.0.get()
    }

    /// Returns the identifier following this one
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // pad so table columns line up
        f.pad(&self.0.to_string())
    }
}

/// Flat key/value form of a book used for storage and transport
///
/// Numeric fields are wide on purpose: out-of-range values must reach the
/// validators rather than fail decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub status: String,
}

/// A validated book record
///
/// Every field satisfies its validator for the whole lifetime of the value;
/// only `status` can change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BookRecord", try_from = "BookRecord")]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    year: i32,
    status: BookStatus,
}

impl Book {
    pub const MIN_YEAR: i32 = validation::MIN_YEAR;
    pub const MIN_TITLE_LENGTH: usize = validation::MIN_TITLE_LENGTH;
    pub const MAX_TITLE_LENGTH: usize = validation::MAX_TITLE_LENGTH;
    pub const MIN_AUTHOR_LENGTH: usize = validation::MIN_AUTHOR_LENGTH;
    pub const MAX_AUTHOR_LENGTH: usize = validation::MAX_AUTHOR_LENGTH;

    /// Creates a book, validating every field
    ///
    /// All failing fields are reported together in [`AppError::InvalidBook`].
    pub fn new(id: i64, title: &str, author: &str, year: i64, status: BookStatus) -> Result<Self> {
        Self::assemble(
            validation::validate_id(id),
            validation::validate_title(title),
            validation::validate_author(author),
            validation::validate_year(year),
            Ok(status),
        )
    }

    /// Rebuilds a book from its flat form, decoding the status string
    pub fn from_record(record: BookRecord) -> Result<Self> {
        Self::assemble(
            validation::validate_id(record.id),
            validation::validate_title(&record.title),
            validation::validate_author(&record.author),
            validation::validate_year(record.year),
            validation::validate_status(&record.status),
        )
    }

    /// Converts the book to its flat form with the status as display string
    pub fn to_record(&self) -> BookRecord {
        BookRecord {
            id: i64::from(self.id.get()),
            title: self.title.clone(),
            author: self.author.clone(),
            year: i64::from(self.year),
            status: self.status.as_str().to_string(),
        }
    }

    fn assemble(
        id: std::result::Result<BookId, ValidationError>,
        title: std::result::Result<String, ValidationError>,
        author: std::result::Result<String, ValidationError>,
        year: std::result::Result<i32, ValidationError>,
        status: std::result::Result<BookStatus, ValidationError>,
    ) -> Result<Self> {
        match (id, title, author, year, status) {
            (Ok(id), Ok(title), Ok(author), Ok(year), Ok(status)) => Ok(Self {
                id,
                title,
                author,
                year,
                status,
            }),
            (id, title, author, year, status) => {
                let errors = [id.err(), title.err(), author.err(), year.err(), status.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                Err(AppError::InvalidBook { errors })
            }
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn status(&self) -> BookStatus {
        self.status
    }

    /// Replaces the availability status
    pub fn set_status(&mut self, status: BookStatus) {
        self.status = status;
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Book({}, {}, {}, {}, {})",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}

impl From<Book> for BookRecord {
    fn from(book: Book) -> Self {
        book.to_record()
    }
}

impl TryFrom<BookRecord> for Book {
    type Error = AppError;

    fn try_from(record: BookRecord) -> Result<Self> {
        Self::from_record(record)
    }
}
