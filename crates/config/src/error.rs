//! Error types for the configuration system

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Config contains invalid values
    #[error("Config validation failed: {0}")]
    ValidationError(String),

    #[error("Failed to create config directory at {path}: {source}")]
    DirectoryCreationError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config directory path could not be determined
    #[error("Could not determine config directory path: {reason}")]
    PathResolutionError { reason: String },

    /// An environment override could not be parsed
    #[error("Invalid value '{value}' in environment variable {name}")]
    InvalidOverride { name: &'static str, value: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Builds a [`ConfigError::ValidationError`] from collected field errors
    pub fn from_validation(errors: &[ValidationError]) -> Self {
        let message = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Self::ValidationError(message)
    }
}

/// Validation error for a specific config field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the field (e.g., "storage.path")
    pub field: String,

    pub message: String,

    /// The invalid value, if available
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Creates a validation error with the invalid value
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        if let Some(ref value) = self.value {
            write!(f, " (got: {})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
