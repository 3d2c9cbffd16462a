//! Field validators for books
//!
//! Every validator is a pure function of its input (plus the current UTC
//! year for [`validate_year`]) and fails on the first violated constraint.
//! [`Book::new`](crate::Book::new) runs all of them and collects the failures.

use crate::error::ValidationError;
use crate::types::{BookId, BookStatus};
use chrono::Datelike;

/// Oldest accepted publication year
pub const MIN_YEAR: i32 = 1000;
/// Minimum title length in characters
pub const MIN_TITLE_LENGTH: usize = 2;
/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 50;
/// Minimum author length in characters
pub const MIN_AUTHOR_LENGTH: usize = 2;
/// Maximum author length in characters
pub const MAX_AUTHOR_LENGTH: usize = 25;

/// Validates a book identifier: a positive integer
pub fn validate_id(id: i64) -> Result<BookId, ValidationError> {
    u32::try_from(id)
        .ok()
        .and_then(BookId::new)
        .ok_or_else(|| {
            ValidationError::with_value(
                "id",
                "ID книги должен быть положительным целым числом",
                id,
            )
        })
}

/// Validates a title and returns it trimmed
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::new(
            "title",
            "Название книги должно быть непустой строкой",
        ));
    }

    let len = title.chars().count();
    if !(MIN_TITLE_LENGTH..=MAX_TITLE_LENGTH).contains(&len) {
        return Err(ValidationError::with_value(
            "title",
            format!(
                "Название книги должно быть длиной от {} до {} символов",
                MIN_TITLE_LENGTH, MAX_TITLE_LENGTH
            ),
            title,
        ));
    }

    Ok(title.to_string())
}

/// Validates an author name and returns it trimmed
///
/// Only Cyrillic and Latin letters, whitespace and periods are accepted.
pub fn validate_author(author: &str) -> Result<String, ValidationError> {
    let author = author.trim();
    if author.is_empty() {
        return Err(ValidationError::new(
            "author",
            "Имя автора должно быть непустой строкой",
        ));
    }

    let len = author.chars().count();
    if !(MIN_AUTHOR_LENGTH..=MAX_AUTHOR_LENGTH).contains(&len) {
        return Err(ValidationError::with_value(
            "author",
            format!(
                "Имя автора должно быть длиной от {} до {} символов",
                MIN_AUTHOR_LENGTH, MAX_AUTHOR_LENGTH
            ),
            author,
        ));
    }

    if !author.chars().all(is_author_char) {
        return Err(ValidationError::with_value(
            "author",
            "Имя автора может содержать только буквы, пробелы и точки",
            author,
        ));
    }

    Ok(author.to_string())
}

fn is_author_char(c: char) -> bool {
    matches!(c, 'А'..='Я' | 'а'..='я' | 'Ё' | 'ё' | 'A'..='Z' | 'a'..='z' | '.') || c.is_whitespace()
}

/// Returns the current calendar year in UTC
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Validates a publication year against the current UTC year
pub fn validate_year(year: i64) -> Result<i32, ValidationError> {
    validate_year_at(year, current_year())
}

/// Validates a publication year against an explicit reference year
pub fn validate_year_at(year: i64, current_year: i32) -> Result<i32, ValidationError> {
    i32::try_from(year)
        .ok()
        .filter(|y| (MIN_YEAR..=current_year).contains(y))
        .ok_or_else(|| {
            ValidationError::with_value(
                "year",
                format!(
                    "Год издания должен быть целым числом в диапазоне от {} до {} включительно",
                    MIN_YEAR, current_year
                ),
                year,
            )
        })
}

/// Validates a status given by its display string
pub fn validate_status(status: &str) -> Result<BookStatus, ValidationError> {
    BookStatus::from_value(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id(1).unwrap().get(), 1);
        assert!(validate_id(0).is_err());
        assert!(validate_id(-1).is_err());
        assert!(validate_id(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_validate_title_trims() {
        assert_eq!(validate_title("  Гарри Поттер  ").unwrap(), "Гарри Поттер");
    }

    #[test]
    fn test_validate_title_boundaries() {
        assert!(validate_title("ab").is_ok());
        assert!(validate_title(&"я".repeat(50)).is_ok());
        assert!(validate_title("a").is_err());
        assert!(validate_title(&"я".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_title_empty_or_whitespace() {
        let err = validate_title("").unwrap_err();
        assert_eq!(err.field, "title");
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_validate_title_length_counts_trimmed_chars() {
        // 1 char after trimming
        assert!(validate_title("  x  ").is_err());
    }

    #[test]
    fn test_validate_author_accepts_letters_spaces_periods() {
        assert_eq!(validate_author("Л. Толстой").unwrap(), "Л. Толстой");
        assert!(validate_author("Толстой Л.Н.").is_ok());
        assert!(validate_author("J. R. R. Tolkien").is_ok());
        assert!(validate_author("Ёлкин").is_ok());
    }

    #[test]
    fn test_validate_author_rejects_digits_and_symbols() {
        assert!(validate_author("Толстой@").is_err());
        assert!(validate_author("Author 2").is_err());
        assert!(validate_author("O'Brien").is_err());
        assert!(validate_author("Jean-Paul").is_err());
    }

    #[test]
    fn test_validate_author_boundaries() {
        assert!(validate_author("Ab").is_ok());
        assert!(validate_author(&"A".repeat(25)).is_ok());
        assert!(validate_author("A").is_err());
        assert!(validate_author(&"A".repeat(26)).is_err());
        assert!(validate_author("").is_err());
    }

    #[test]
    fn test_validate_year_boundaries() {
        let now = current_year();
        assert_eq!(validate_year(1000).unwrap(), 1000);
        assert_eq!(validate_year(i64::from(now)).unwrap(), now);
        assert!(validate_year(999).is_err());
        assert!(validate_year(i64::from(now) + 1).is_err());
    }

    #[test]
    fn test_validate_year_at_reference_year() {
        assert!(validate_year_at(1999, 1999).is_ok());
        assert!(validate_year_at(2000, 1999).is_err());
        let err = validate_year_at(-5, 2024).unwrap_err();
        assert!(err.message.contains("2024"));
    }

    #[test]
    fn test_validate_status() {
        assert_eq!(validate_status("выдана").unwrap(), BookStatus::Borrowed);
        assert!(validate_status("lost").is_err());
    }
}
