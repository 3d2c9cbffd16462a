// FILE: crates/library/src/manager.rs

use crate::display::{self, EMPTY_LIBRARY_MESSAGE};
use crate::error::{LibraryError, Result};
use crate::search::{search_books, SearchField};
use crate::storage::LibraryStorage;
use bookshelf_core::{Book, BookId, BookRecord, BookStatus};
use log::{debug, info, warn};
use serde::Deserialize;
use std::path::Path;

/// Owns the book collection and keeps its storage file in sync
///
/// Every mutation rewrites the whole storage file. A mutation whose save
/// fails is rolled back, so memory and disk never disagree.
#[derive(Debug)]
pub struct LibraryManager {
    storage: LibraryStorage,
    books: Vec<Book>,
    last_id: u32,
}

impl LibraryManager {
    /// Opens the collection stored at `path`
    ///
    /// A missing or unparsable file yields an empty collection. Records that
    /// fail validation, or repeat an id already loaded, are skipped with a
    /// warning.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let storage = LibraryStorage::new(path.as_ref())?;
        info!("Opening library at {}", storage.path().display());

        let mut manager = Self {
            storage,
            books: Vec::new(),
            last_id: 0,
        };
        manager.load()?;
        Ok(manager)
    }

    fn load(&mut self) -> Result<()> {
        let Some(stored) = self.storage.load()? else {
            return Ok(());
        };

        self.last_id = match stored.last_id() {
            Some(last_id) => last_id,
            None => {
                if !stored.last_id.is_null() {
                    warn!(
                        "Ignoring unusable last_id {} in {}",
                        stored.last_id,
                        self.storage.path().display()
                    );
                }
                0
            }
        };

        let values: &[serde_json::Value] = match stored.book_values() {
            Some(values) => values,
            None => {
                if !stored.books.is_null() {
                    warn!(
                        "Ignoring non-array books entry in {}",
                        self.storage.path().display()
                    );
                }
                &[]
            }
        };

        for value in values {
            let book = BookRecord::deserialize(value)
                .map_err(LibraryError::from)
                .and_then(|record| Book::from_record(record).map_err(LibraryError::from));

            match book.and_then(|book| self.insert(book)) {
                Ok(()) => {}
                Err(e) => warn!("Skipping book record {}: {}", value, e),
            }
        }

        info!(
            "Loaded {} books (last id {}) from {}",
            self.books.len(),
            self.last_id,
            self.storage.path().display()
        );
        Ok(())
    }

    /// Appends a book, enforcing id uniqueness and advancing `last_id`
    fn insert(&mut self, book: Book) -> Result<()> {
        if self.find_book(book.id()).is_some() {
            return Err(LibraryError::DuplicateId(book.id()));
        }
        self.last_id = self.last_id.max(book.id().get());
        self.books.push(book);
        Ok(())
    }

    fn position(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id() == id)
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(self.last_id, &self.books)
    }

    /// Adds a new book with the next free id and status [`BookStatus::InStock`]
    ///
    /// Nothing changes when validation or the save fails.
    pub fn add_book(&mut self, title: &str, author: &str, year: i64) -> Result<Book> {
        let id = self
            .last_id
            .checked_add(1)
            .ok_or(LibraryError::IdsExhausted)?;
        let book = Book::new(i64::from(id), title, author, year, BookStatus::InStock)?;

        let previous_last_id = self.last_id;
        self.insert(book.clone())?;
        if let Err(e) = self.persist() {
            self.books.pop();
            self.last_id = previous_last_id;
            return Err(e);
        }

        info!("Added {}", book);
        Ok(book)
    }

    /// Removes the book with `id`, returning it, or `None` if there is no such book
    pub fn delete_book(&mut self, id: BookId) -> Result<Option<Book>> {
        let Some(index) = self.position(id) else {
            debug!("Delete requested for unknown book {}", id);
            return Ok(None);
        };

        let removed = self.books.remove(index);
        if let Err(e) = self.persist() {
            self.books.insert(index, removed);
            return Err(e);
        }

        info!("Deleted {}", removed);
        Ok(Some(removed))
    }

    /// Sets the status of the book with `id`, returning the updated book
    pub fn change_status(&mut self, id: BookId, status: BookStatus) -> Result<Option<Book>> {
        let Some(index) = self.position(id) else {
            debug!("Status change requested for unknown book {}", id);
            return Ok(None);
        };

        let previous = self.books[index].status();
        self.books[index].set_status(status);
        if let Err(e) = self.persist() {
            self.books[index].set_status(previous);
            return Err(e);
        }

        info!("Book {} status changed to '{}'", id, status);
        Ok(Some(self.books[index].clone()))
    }

    /// Searches `field` (one of "title", "author", "year") for `keyword`
    pub fn search(&self, keyword: &str, field: &str) -> Result<Vec<&Book>> {
        let field: SearchField = field.parse()?;
        Ok(self.search_by(keyword, field))
    }

    /// Searches an already parsed field
    pub fn search_by(&self, keyword: &str, field: SearchField) -> Vec<&Book> {
        search_books(&self.books, keyword, field)
    }

    /// Renders the whole collection as a table
    pub fn render_listing(&self) -> String {
        if self.books.is_empty() {
            EMPTY_LIBRARY_MESSAGE.to_string()
        } else {
            display::render_books(&self.books)
        }
    }

    /// Renders a subset of books (e.g. search results) as a table
    pub fn render_books<'a, I>(books: I) -> String
    where
        I: IntoIterator<Item = &'a Book>,
    {
        display::render_books(books)
    }

    /// Writes the current state to disk
    ///
    /// Every mutation already saves; calling this again produces the same file.
    pub fn close(&self) -> Result<()> {
        self.persist()?;
        info!("Library saved to {}", self.storage.path().display());
        Ok(())
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn find_book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id() == id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Highest id ever assigned in this collection
    pub fn last_id(&self) -> u32 {
        self.last_id
    }

    pub fn storage_path(&self) -> &Path {
        self.storage.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_manager() -> (TempDir, LibraryManager) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = LibraryManager::open(temp_dir.path().join("library.json"))
            .expect("Failed to open library");
        (temp_dir, manager)
    }

    fn id(n: u32) -> BookId {
        BookId::new(n).unwrap()
    }

    #[test]
    fn test_open_rejects_bad_extension() {
        let temp_dir = TempDir::new().unwrap();
        let result = LibraryManager::open(temp_dir.path().join("library.txt"));
        assert!(matches!(result, Err(LibraryError::InvalidStoragePath { .. })));
    }

    #[test]
    fn test_open_fresh_is_empty() {
        let (_temp_dir, manager) = setup_manager();
        assert!(manager.is_empty());
        assert_eq!(manager.last_id(), 0);
        assert_eq!(manager.render_listing(), EMPTY_LIBRARY_MESSAGE);
    }

    #[test]
    fn test_add_book_assigns_next_id() {
        let (_temp_dir, mut manager) = setup_manager();
        let first = manager.add_book("Title", "Author", 2000).unwrap();
        let second = manager.add_book("Other", "Author", 2001).unwrap();

        assert_eq!(first.id().get(), 1);
        assert_eq!(second.id().get(), 2);
        assert_eq!(first.status(), BookStatus::InStock);
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.last_id(), 2);
    }

    #[test]
    fn test_add_invalid_book_leaves_state_unchanged() {
        let (_temp_dir, mut manager) = setup_manager();
        manager.add_book("Title", "Author", 2000).unwrap();

        let err = manager.add_book("T", "Author 9", 999).unwrap_err();
        assert!(matches!(err, LibraryError::Invalid(_)));
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.last_id(), 1);
    }

    #[test]
    fn test_add_persists_immediately() {
        let (temp_dir, mut manager) = setup_manager();
        manager.add_book("Title", "Author", 2000).unwrap();

        let reopened = LibraryManager::open(temp_dir.path().join("library.json")).unwrap();
        assert_eq!(reopened.books(), manager.books());
        assert_eq!(reopened.last_id(), 1);
    }

    #[test]
    fn test_delete_book() {
        let (_temp_dir, mut manager) = setup_manager();
        manager.add_book("Title", "Author", 2000).unwrap();

        let removed = manager.delete_book(id(1)).unwrap();
        assert_eq!(removed.map(|b| b.title().to_string()), Some("Title".to_string()));
        assert!(manager.is_empty());
        assert_eq!(manager.last_id(), 1);
    }

    #[test]
    fn test_delete_unknown_book_is_not_an_error() {
        let (_temp_dir, mut manager) = setup_manager();
        manager.add_book("Title", "Author", 2000).unwrap();

        assert!(manager.delete_book(id(999)).unwrap().is_none());
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.last_id(), 1);
    }

    #[test]
    fn test_change_status() {
        let (_temp_dir, mut manager) = setup_manager();
        manager.add_book("Title", "Author", 2000).unwrap();

        let updated = manager.change_status(id(1), BookStatus::Borrowed).unwrap().unwrap();
        assert_eq!(updated.status(), BookStatus::Borrowed);
        assert_eq!(manager.find_book(id(1)).unwrap().status(), BookStatus::Borrowed);
    }

    #[test]
    fn test_change_status_unknown_book() {
        let (_temp_dir, mut manager) = setup_manager();
        assert!(manager.change_status(id(5), BookStatus::Borrowed).unwrap().is_none());
        assert_eq!(manager.last_id(), 0);
    }

    #[test]
    fn test_search_valid_field() {
        let (_temp_dir, mut manager) = setup_manager();
        manager.add_book("Title", "Author", 2000).unwrap();

        let results = manager.search("title", "title").unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_search_invalid_field() {
        let (_temp_dir, manager) = setup_manager();
        let result = manager.search("title", "invalid");
        assert!(matches!(result, Err(LibraryError::InvalidSearchField { .. })));
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let (_temp_dir, mut manager) = setup_manager();
        let book = manager.add_book("Title", "Author", 2000).unwrap();

        let err = manager.insert(book).unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateId(_)));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("library.json");
        let mut manager = LibraryManager::open(&path).unwrap();
        manager.add_book("Title", "Author", 2000).unwrap();

        // a directory in place of the file makes every rename fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"").unwrap();

        let add = manager.add_book("Other", "Author", 2001);
        let delete = manager.delete_book(id(1));
        let status = manager.change_status(id(1), BookStatus::Borrowed);

        assert!(matches!(add, Err(LibraryError::Storage { .. })));
        assert!(matches!(delete, Err(LibraryError::Storage { .. })));
        assert!(matches!(status, Err(LibraryError::Storage { .. })));
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.last_id(), 1);
        assert_eq!(manager.books()[0].status(), BookStatus::InStock);
    }
}
