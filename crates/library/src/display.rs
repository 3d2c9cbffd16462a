//! Fixed-width table rendering of books
//!
//! Column widths come from the entity's declared maximum field lengths, so a
//! table never shifts no matter which books are in it.

use bookshelf_core::{Book, BookStatus};

pub const ID_WIDTH: usize = 7;
pub const TITLE_WIDTH: usize = Book::MAX_TITLE_LENGTH;
pub const AUTHOR_WIDTH: usize = Book::MAX_AUTHOR_LENGTH;
pub const YEAR_WIDTH: usize = 10;

/// Shown instead of a table when the whole collection is empty
pub const EMPTY_LIBRARY_MESSAGE: &str = "В библиотеке пока нет книг.";

/// Shown instead of a table when a subset (e.g. search results) is empty
pub const NO_BOOKS_MESSAGE: &str = "Нет книг для отображения.";

fn status_width() -> usize {
    BookStatus::max_display_len()
}

/// Renders `books` as a table, or [`NO_BOOKS_MESSAGE`] when there are none
pub fn render_books<'a, I>(books: I) -> String
where
    I: IntoIterator<Item = &'a Book>,
{
    let rows: Vec<String> = books.into_iter().map(render_row).collect();
    if rows.is_empty() {
        return NO_BOOKS_MESSAGE.to_string();
    }

    let status_width = status_width();
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!(
        "{:<id_w$} {:<title_w$} {:<author_w$} {:<year_w$} {:<status_w$}",
        "ID",
        "Название",
        "Автор",
        "Год",
        "Статус",
        id_w = ID_WIDTH,
        title_w = TITLE_WIDTH,
        author_w = AUTHOR_WIDTH,
        year_w = YEAR_WIDTH,
        status_w = status_width,
    ));
    lines.push("-".repeat(ID_WIDTH + TITLE_WIDTH + AUTHOR_WIDTH + YEAR_WIDTH + status_width));
    lines.extend(rows);
    lines.join("\n")
}

fn render_row(book: &Book) -> String {
    format!(
        "{:<id_w$} {:<title_w$} {:<author_w$} {:<year_w$} {:<status_w$}",
        book.id(),
        book.title(),
        book.author(),
        book.year(),
        book.status(),
        id_w = ID_WIDTH,
        title_w = TITLE_WIDTH,
        author_w = AUTHOR_WIDTH,
        year_w = YEAR_WIDTH,
        status_w = status_width(),
    )
}
