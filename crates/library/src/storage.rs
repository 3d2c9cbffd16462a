//! File system persistence for the book collection
//!
//! The whole collection lives in one JSON document:
//! - Every save rewrites the full document
//! - Writes go to a temporary file that is atomically renamed over the target
//! - A missing or unparsable file reads as "nothing stored yet"

use crate::error::{LibraryError, LibraryResult};
use bookshelf_core::paths::{has_storage_extension, STORAGE_EXTENSION};
use bookshelf_core::Book;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Raw document read back from disk
///
/// Both keys are kept undecoded so that a damaged counter or one bad record
/// does not spoil the rest of the file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StoredLibrary {
    #[serde(default)]
    pub last_id: Value,
    #[serde(default)]
    pub books: Value,
}

impl StoredLibrary {
    /// The stored counter, if it is an integer in `0..=u32::MAX`
    pub fn last_id(&self) -> Option<u32> {
        self.last_id.as_u64().and_then(|id| u32::try_from(id).ok())
    }

    /// The stored records, if `books` is an array
    pub fn book_values(&self) -> Option<&[Value]> {
        self.books.as_array().map(Vec::as_slice)
    }
}

#[derive(Serialize)]
struct LibrarySnapshot<'a> {
    last_id: u32,
    books: &'a [Book],
}

/// Handles reading and writing the storage file
#[derive(Debug, Clone)]
pub struct LibraryStorage {
    path: PathBuf,
}

impl LibraryStorage {
    /// Creates a storage handler, validating the file extension
    pub fn new(path: impl Into<PathBuf>) -> LibraryResult<Self> {
        let path = path.into();
        Self::validate_path(&path)?;
        Ok(Self { path })
    }

    /// Checks that `path` names a `.json` file (extension is case-insensitive)
    pub fn validate_path(path: &Path) -> LibraryResult<()> {
        if path.to_str().is_none() {
            return Err(LibraryError::InvalidStoragePath {
                path: path.to_path_buf(),
                reason: "путь должен быть корректной строкой UTF-8".to_string(),
            });
        }

        if !has_storage_extension(path) {
            return Err(LibraryError::InvalidStoragePath {
                path: path.to_path_buf(),
                reason: format!(
                    "файл для хранения данных должен иметь расширение {}",
                    STORAGE_EXTENSION
                ),
            });
        }

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the storage file
    ///
    /// Returns `Ok(None)` when the file does not exist or does not parse.
    /// Other read failures are returned so that a later save cannot clobber
    /// a file that merely could not be read.
    pub fn load(&self) -> LibraryResult<Option<StoredLibrary>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!(
                    "Library file not found at {}, starting empty",
                    self.path.display()
                );
                return Ok(None);
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                log::warn!(
                    "Library file at {} is not valid UTF-8, starting empty",
                    self.path.display()
                );
                return Ok(None);
            }
            Err(e) => return Err(self.storage_error(e)),
        };

        let document = serde_json::from_str::<Value>(&contents).and_then(|value| {
            if value.is_object() {
                serde_json::from_value::<StoredLibrary>(value).map(Some)
            } else {
                Ok(None)
            }
        });

        match document {
            Ok(Some(stored)) => Ok(Some(stored)),
            Ok(None) => {
                log::warn!(
                    "Library file at {} is not a JSON object, starting empty",
                    self.path.display()
                );
                Ok(None)
            }
            Err(e) => {
                log::warn!(
                    "Library file at {} could not be parsed ({}), starting empty",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    /// Writes the full collection atomically
    pub fn save(&self, last_id: u32, books: &[Book]) -> LibraryResult<()> {
        let contents = Self::render(last_id, books)?;

        let dir = self.parent_dir();
        Self::ensure_directory_exists(dir).map_err(|e| self.storage_error(e))?;

        let temp_file = NamedTempFile::new_in(dir).map_err(|e| self.storage_error(e))?;
        self.write_atomic(temp_file, &contents)?;

        log::debug!("Saved {} books to {}", books.len(), self.path.display());
        Ok(())
    }

    /// Serializes the document with four-space indentation
    ///
    /// Non-ASCII text is written as-is.
    pub fn render(last_id: u32, books: &[Book]) -> LibraryResult<String> {
        let snapshot = LibrarySnapshot { last_id, books };
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        snapshot.serialize(&mut serializer)?;
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn ensure_directory_exists(dir: &Path) -> std::io::Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            log::info!("Created library directory: {}", dir.display());
        }
        Ok(())
    }

    /// Writes content to a temporary file and atomically renames it
    fn write_atomic(&self, mut temp_file: NamedTempFile, content: &str) -> LibraryResult<()> {
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| self.storage_error(e))?;
        temp_file.flush().map_err(|e| self.storage_error(e))?;

        temp_file
            .persist(&self.path)
            .map_err(|e| self.storage_error(e.error))?;

        Ok(())
    }

    fn storage_error(&self, source: std::io::Error) -> LibraryError {
        LibraryError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}
