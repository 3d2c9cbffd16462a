//! Keyword search over the collection

use crate::error::LibraryError;
use bookshelf_core::Book;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Book field a search can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Author,
    Year,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [SearchField::Title, SearchField::Author, SearchField::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Year => "year",
        }
    }

    /// Names accepted by [`FromStr`], in declaration order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.as_str()).collect()
    }

    /// Text form of this field for `book`; the year is its decimal representation
    pub fn value_of<'a>(&self, book: &'a Book) -> Cow<'a, str> {
        match self {
            Self::Title => Cow::Borrowed(book.title()),
            Self::Author => Cow::Borrowed(book.author()),
            Self::Year => Cow::Owned(book.year().to_string()),
        }
    }

    /// Case-insensitive substring match of `keyword` against this field
    pub fn matches(&self, book: &Book, keyword: &str) -> bool {
        self.value_of(book)
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| LibraryError::InvalidSearchField {
                field: s.to_string(),
                allowed: Self::names(),
            })
    }
}

/// Returns the books whose `field` contains `keyword`, in collection order
pub fn search_books<'a>(books: &'a [Book], keyword: &str, field: SearchField) -> Vec<&'a Book> {
    books
        .iter()
        .filter(|book| field.matches(book, keyword))
        .collect()
}
