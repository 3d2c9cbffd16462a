//! Validation system for configuration values
//!
//! Each config section implements [`ConfigSection`], which includes validation.

pub use crate::error::ValidationError;
use std::path::Path;

/// Trait for configuration sections that can validate themselves
pub trait ConfigSection: Default {
    /// Validates the configuration section
    fn validate(&self) -> Result<(), Vec<ValidationError>>;
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a path is set
    pub fn path_not_empty(path: &Path, field: &str) -> Result<(), ValidationError> {
        if path.as_os_str().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Validates that a path ends with `suffix`, ignoring case
    pub fn has_suffix(path: &Path, suffix: &str, field: &str) -> Result<(), ValidationError> {
        let matches = path
            .to_str()
            .map(|s| s.to_lowercase().ends_with(&suffix.to_lowercase()))
            .unwrap_or(false);

        if matches {
            Ok(())
        } else {
            Err(ValidationError::with_value(
                field,
                format!("must end in {}", suffix),
                path.display(),
            ))
        }
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
