//! Error types for the book domain
//!
//! Validation problems are described by [`ValidationError`], one per failing
//! field. Constructing a whole [`Book`](crate::Book) collects every failing
//! field into [`AppError::InvalidBook`], so the caller sees all of them at once.
//!
//! Errors classify themselves with [`ErrorSeverity`] so that outer layers can
//! decide between re-prompting the user and aborting.

use std::fmt;
use thiserror::Error;

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// The user can correct the input and try again
    Recoverable,
    /// State on disk may be out of reach; the operation cannot be retried blindly
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "Recoverable"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Validation error for a single field of a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the field (e.g. "title")
    pub field: String,

    /// Human-readable description of the violated constraint
    pub message: String,

    /// The rejected value, if available
    pub value: Option<String>,

    /// Acceptable values, for enumerated fields
    pub allowed: Vec<String>,
}

impl ValidationError {
    /// Creates a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
            allowed: Vec::new(),
        }
    }

    /// Creates a validation error with the rejected value
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::new(field, message)
        }
    }

    /// Attaches the list of acceptable values
    pub fn with_allowed<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = allowed.into_iter().map(Into::into).collect();
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Main error type for the book domain
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A single field failed its validator
    #[error(transparent)]
    InvalidField(#[from] ValidationError),

    /// One or more fields failed while constructing a book
    #[error("{}", join_messages(.errors))]
    InvalidBook { errors: Vec<ValidationError> },
}

impl AppError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidField(_) | Self::InvalidBook { .. } => ErrorSeverity::Recoverable,
        }
    }

    /// Returns every field-level error carried by this error
    pub fn field_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidField(e) => std::slice::from_ref(e),
            Self::InvalidBook { errors } => errors,
        }
    }

    /// Returns true if any of the carried errors concerns `field`
    pub fn concerns(&self, field: &str) -> bool {
        self.field_errors().iter().any(|e| e.field == field)
    }

    /// Returns a user-friendly message suitable for the terminal
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;
