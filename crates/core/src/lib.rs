//! Bookshelf core domain
//!
//! The validated [`Book`] entity, the [`BookStatus`] enumeration and the
//! field validators they are built from, plus the storage file naming rules.
//! Nothing in this crate performs I/O.

pub mod error;
pub mod paths;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{AppError, ErrorSeverity, Result, ValidationError};
pub use paths::{DEFAULT_STORAGE_PATH, STORAGE_EXTENSION};
pub use types::{Book, BookId, BookRecord, BookStatus};
