//! Book storage configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use bookshelf_core::paths::{DEFAULT_STORAGE_PATH, STORAGE_EXTENSION};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the book collection is kept
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the JSON file (relative paths resolve against the working directory)
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

impl ConfigSection for StorageConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        if let Err(e) = Validator::path_not_empty(&self.path, "storage.path") {
            return Err(vec![e]);
        }

        Validator::collect_errors(vec![Validator::has_suffix(
            &self.path,
            STORAGE_EXTENSION,
            "storage.path",
        )])
    }
}
