//! Domain types for Bookshelf
//!
//! - `book`: the validated `Book` entity, its identifier and flat record form
//! - `status`: the closed `BookStatus` enumeration

mod book;
mod status;

pub use book::{Book, BookId, BookRecord};
pub use status::BookStatus;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_types_are_exported() {
        let _id: Option<BookId> = BookId::new(1);
        let _status: BookStatus = BookStatus::InStock;
    }
}
