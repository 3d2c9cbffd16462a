//! Storage file naming shared by the library and its configuration

use std::path::Path;

/// Extension every storage file must carry
pub const STORAGE_EXTENSION: &str = ".json";

/// Storage file used when nothing else is configured
pub const DEFAULT_STORAGE_PATH: &str = "library.json";

/// Whether `path` ends in [`STORAGE_EXTENSION`], ignoring case
///
/// Paths that are not valid UTF-8 never match.
pub fn has_storage_extension(path: &Path) -> bool {
    path.to_str()
        .is_some_and(|text| text.to_lowercase().ends_with(STORAGE_EXTENSION))
}
