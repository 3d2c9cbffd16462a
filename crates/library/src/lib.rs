//! Bookshelf collection management
//!
//! [`LibraryManager`] owns the in-memory book list and the JSON file it is
//! stored in. Every add, delete and status change rewrites that file.

pub mod display;
pub mod error;
pub mod manager;
pub mod search;
pub mod storage;

pub use error::{LibraryError, LibraryResult};
pub use manager::LibraryManager;
pub use search::SearchField;
pub use storage::LibraryStorage;
