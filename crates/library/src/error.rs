// FILE: crates/library/src/error.rs

use bookshelf_core::{AppError, BookId, ErrorSeverity};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    /// A book or one of its fields failed validation
    #[error(transparent)]
    Invalid(#[from] AppError),

    #[error("Книга с ID {0} уже существует")]
    DuplicateId(BookId),

    #[error("Недопустимое поле для поиска: '{field}'. Допустимые значения: {}", .allowed.join(", "))]
    InvalidSearchField {
        field: String,
        allowed: Vec<&'static str>,
    },

    #[error("Недопустимый файл хранилища {}: {reason}", .path.display())]
    InvalidStoragePath { path: PathBuf, reason: String },

    #[error("Не удалось сохранить данные в {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Ошибка формата JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Identifiers ran past the representable range
    #[error("Исчерпан диапазон идентификаторов книг")]
    IdsExhausted,
}

impl LibraryError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invalid(e) => e.severity(),
            Self::DuplicateId(_) | Self::InvalidSearchField { .. } => ErrorSeverity::Recoverable,
            Self::InvalidStoragePath { .. }
            | Self::Storage { .. }
            | Self::Json(_)
            | Self::IdsExhausted => ErrorSeverity::Fatal,
        }
    }
}

// Both type aliases for convenience
pub type Result<T> = std::result::Result<T, LibraryError>;
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
