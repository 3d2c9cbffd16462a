// FILE: crates/library/tests/storage_tests.rs
//! Loading hand-written and damaged storage files

use bookshelf_core::BookStatus;
use bookshelf_library::LibraryManager;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn write_store(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("library.json");
    fs::write(&path, contents).expect("Failed to write store");
    (temp_dir, path)
}

#[test]
fn test_loads_well_formed_store() -> TestResult {
    let (_temp_dir, path) = write_store(
        r#"{
            "last_id": 5,
            "books": [
                {"id": 2, "title": "Война и мир", "author": "Л. Толстой", "year": 1869, "status": "в наличии"},
                {"id": 5, "title": "Дюна", "author": "Ф. Херберт", "year": 1965, "status": "выдана"}
            ]
        }"#,
    );

    let manager = LibraryManager::open(&path)?;
    assert_eq!(manager.len(), 2);
    assert_eq!(manager.last_id(), 5);
    assert_eq!(manager.books()[0].title(), "Война и мир");
    assert_eq!(manager.books()[1].status(), BookStatus::Borrowed);
    Ok(())
}

#[test]
fn test_duplicate_ids_keep_first_record() -> TestResult {
    let (_temp_dir, path) = write_store(
        r#"{
            "last_id": 1,
            "books": [
                {"id": 1, "title": "First", "author": "Author", "year": 2000, "status": "в наличии"},
                {"id": 1, "title": "Second", "author": "Author", "year": 2001, "status": "выдана"}
            ]
        }"#,
    );

    let manager = LibraryManager::open(&path)?;
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.books()[0].title(), "First");
    Ok(())
}

#[test]
fn test_invalid_records_are_skipped() -> TestResult {
    let (_temp_dir, path) = write_store(
        r#"{
            "last_id": 4,
            "books": [
                {"id": 1, "title": "Good", "author": "Author", "year": 2000, "status": "в наличии"},
                {"id": 2, "title": "X", "author": "Author", "year": 2000, "status": "в наличии"},
                {"id": 3, "title": "Bad status", "author": "Author", "year": 2000, "status": "lost"},
                {"id": "4", "title": "Wrong type", "author": "Author", "year": 2000, "status": "выдана"},
                {"title": "Missing id", "author": "Author", "year": 2000, "status": "выдана"},
                {"id": 0, "title": "Zero id", "author": "Author", "year": 2000, "status": "выдана"},
                "not even an object"
            ]
        }"#,
    );

    let manager = LibraryManager::open(&path)?;
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.books()[0].title(), "Good");
    assert_eq!(manager.last_id(), 4);
    Ok(())
}

#[test]
fn test_last_id_never_below_loaded_ids() -> TestResult {
    let (_temp_dir, path) = write_store(
        r#"{"last_id": 1, "books": [
            {"id": 7, "title": "Seven", "author": "Author", "year": 2000, "status": "в наличии"}
        ]}"#,
    );

    let mut manager = LibraryManager::open(&path)?;
    assert_eq!(manager.last_id(), 7);
    assert_eq!(manager.add_book("Eight", "Author", 2000)?.id().get(), 8);
    Ok(())
}

#[test]
fn test_missing_keys_default_to_empty() -> TestResult {
    let (_temp_dir, path) = write_store("{}");
    let manager = LibraryManager::open(&path)?;
    assert!(manager.is_empty());
    assert_eq!(manager.last_id(), 0);
    Ok(())
}

#[test]
fn test_negative_last_id_is_ignored() -> TestResult {
    let (_temp_dir, path) = write_store(r#"{"last_id": -3, "books": []}"#);
    let manager = LibraryManager::open(&path)?;
    assert_eq!(manager.last_id(), 0);
    Ok(())
}

#[test]
fn test_unusable_last_id_keeps_books() -> TestResult {
    let books = r#"[
        {"id": 1, "title": "Война и мир", "author": "Л. Толстой", "year": 1869, "status": "в наличии"},
        {"id": 2, "title": "Дюна", "author": "Ф. Херберт", "year": 1965, "status": "выдана"}
    ]"#;

    for last_id in ["null", "2.0", "18446744073709551615", "\"2\"", "[2]"] {
        let (_temp_dir, path) =
            write_store(&format!(r#"{{"last_id": {}, "books": {}}}"#, last_id, books));

        let mut manager = LibraryManager::open(&path)?;
        assert_eq!(manager.len(), 2, "last_id {}", last_id);
        assert_eq!(manager.last_id(), 2, "last_id {}", last_id);

        assert_eq!(manager.add_book("Третья", "Автор", 2000)?.id().get(), 3);
        let reopened = LibraryManager::open(&path)?;
        assert_eq!(reopened.len(), 3, "last_id {}", last_id);
        assert_eq!(reopened.last_id(), 3);
    }
    Ok(())
}

#[test]
fn test_non_array_books_keeps_last_id() -> TestResult {
    for books in ["null", "{\"id\": 1}", "\"books\"", "7"] {
        let (_temp_dir, path) = write_store(&format!(r#"{{"last_id": 4, "books": {}}}"#, books));

        let mut manager = LibraryManager::open(&path)?;
        assert!(manager.is_empty(), "books {}", books);
        assert_eq!(manager.last_id(), 4, "books {}", books);
        assert_eq!(manager.add_book("Title", "Author", 2000)?.id().get(), 5);
    }
    Ok(())
}

#[test]
fn test_malformed_store_starts_empty() -> TestResult {
    let (_temp_dir, path) = write_store("{\"last_id\": 3, \"books\": [");
    let mut manager = LibraryManager::open(&path)?;
    assert!(manager.is_empty());
    assert_eq!(manager.last_id(), 0);

    manager.add_book("Title", "Author", 2000)?;
    let contents = fs::read_to_string(&path)?;
    assert!(contents.contains("\"last_id\": 1"));
    Ok(())
}

#[test]
fn test_mutation_rewrites_store_in_canonical_form() -> TestResult {
    let (_temp_dir, path) = write_store(
        r#"{"books": [{"id": 1, "title": "  Padded  ", "author": "Author", "year": 2000, "status": "ВЫДАНА"}], "last_id": 1}"#,
    );

    let mut manager = LibraryManager::open(&path)?;
    manager.close()?;

    let contents = fs::read_to_string(&path)?;
    let expected = "{\n    \"last_id\": 1,\n    \"books\": [\n        {\n            \"id\": 1,\n            \"title\": \"Padded\",\n            \"author\": \"Author\",\n            \"year\": 2000,\n            \"status\": \"выдана\"\n        }\n    ]\n}";
    assert_eq!(contents, expected);

    manager.add_book("Second", "Author", 2001)?;
    let reopened = LibraryManager::open(&path)?;
    assert_eq!(reopened.len(), 2);
    Ok(())
}
