// FILE: crates/cli/src/menu.rs

use crate::input::{parse_int, InputError, Prompter};
use anyhow::{Context, Result};
use bookshelf_core::validation::{
    validate_author, validate_id, validate_status, validate_title, validate_year,
};
use bookshelf_core::{BookId, BookStatus};
use bookshelf_library::{LibraryManager, SearchField};
use console::style;
use std::io::{self, BufRead, Write};

const MENU: &str = "\n1. Добавить книгу\n\
                    2. Удалить книгу\n\
                    3. Найти книгу\n\
                    4. Показать все книги\n\
                    5. Изменить статус книги\n\
                    6. Выйти\n";

const SEPARATOR_WIDTH: usize = 25;

const FAREWELL: &str = "Спасибо за использование библиотеки!";

/// Runs the interactive menu until the user exits or input ends
///
/// The library is closed on the way out either way.
pub fn run<R: BufRead, W: Write>(
    library: &mut LibraryManager,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    loop {
        match step(library, prompter) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                log::info!("Input closed, leaving the menu");
                writeln!(prompter.writer())?;
                break;
            }
            Err(e) => return Err(e).context("Failed to read input"),
        }
    }

    library.close().context("Не удалось сохранить библиотеку")?;
    farewell(prompter.writer())?;
    Ok(())
}

fn farewell<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", FAREWELL)
}

/// Leaves the menu on Ctrl-C
///
/// Every change is saved as it is made, so only the farewell is left to do.
pub fn interrupted<W: Write>(out: &mut W) -> io::Result<()> {
    log::info!("Interrupted, leaving the menu");
    writeln!(out)?;
    farewell(out)?;
    out.flush()
}

/// Handles one menu choice; returns false when the user chose to exit
fn step<R: BufRead, W: Write>(
    library: &mut LibraryManager,
    prompter: &mut Prompter<R, W>,
) -> io::Result<bool> {
    writeln!(prompter.writer(), "{}", MENU)?;
    let choice = prompter.read_int("Выберите действие: ", Some(1..=6))?;

    match choice {
        1 => add_book(library, prompter)?,
        2 => delete_book(library, prompter)?,
        3 => search_books(library, prompter)?,
        4 => {
            writeln!(prompter.writer())?;
            writeln!(prompter.writer(), "{}", library.render_listing())?;
        }
        5 => change_status(library, prompter)?,
        _ => return Ok(false),
    }

    writeln!(prompter.writer(), "{}", "-".repeat(SEPARATOR_WIDTH))?;
    Ok(true)
}

fn read_id<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, prompt: &str) -> io::Result<BookId> {
    prompter.retry(prompt, |line| -> Result<BookId, InputError> {
        Ok(validate_id(parse_int(line, None)?)?)
    })
}

fn add_book<R: BufRead, W: Write>(
    library: &mut LibraryManager,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()> {
    let title = prompter.retry("Введите название книги: ", validate_title)?;
    let author = prompter.retry("Введите автора книги: ", validate_author)?;
    let year = prompter.retry("Введите год издания книги: ", |line| -> Result<i32, InputError> {
        Ok(validate_year(parse_int(line, None)?)?)
    })?;
    writeln!(prompter.writer())?;

    match library.add_book(&title, &author, i64::from(year)) {
        Ok(book) => success(
            prompter.writer(),
            &format!("Книга '{}' успешно добавлена.", book.title()),
        ),
        Err(e) => failure(prompter.writer(), &format!("Не удалось добавить книгу: {}", e)),
    }
}

fn delete_book<R: BufRead, W: Write>(
    library: &mut LibraryManager,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()> {
    let id = read_id(prompter, "Введите ID книги для удаления: ")?;
    writeln!(prompter.writer())?;

    match library.delete_book(id) {
        Ok(Some(_)) => success(
            prompter.writer(),
            &format!("Книга с ID {} успешно удалена", id),
        ),
        Ok(None) => failure(prompter.writer(), &format!("Книга с ID {} не найдена", id)),
        Err(e) => failure(prompter.writer(), &format!("Не удалось удалить книгу: {}", e)),
    }
}

fn search_books<R: BufRead, W: Write>(
    library: &LibraryManager,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()> {
    let names = SearchField::names();
    let field: SearchField = prompter
        .read_str(
            &format!("Введите по какому полю искать ({}): ", names.join(", ")),
            Some(names.as_slice()),
        )?
        .parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let keyword = prompter.read_str("Введите ключевое слово для поиска: ", None)?;
    writeln!(prompter.writer())?;

    let found = library.search_by(&keyword, field);
    if found.is_empty() {
        writeln!(prompter.writer(), "Книги не найдены.")?;
    } else {
        writeln!(prompter.writer(), "Результат поиска:")?;
        writeln!(prompter.writer(), "{}", LibraryManager::render_books(found))?;
    }
    Ok(())
}

fn change_status<R: BufRead, W: Write>(
    library: &mut LibraryManager,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()> {
    let id = read_id(prompter, "Введите ID книги для изменения статуса: ")?;
    let status: BookStatus = prompter.retry(
        &format!(
            "Введите новый статус ({}): ",
            BookStatus::values().join(", ")
        ),
        validate_status,
    )?;
    writeln!(prompter.writer())?;

    match library.change_status(id, status) {
        Ok(Some(_)) => success(
            prompter.writer(),
            &format!("Статус книги с ID {} изменен на '{}'", id, status),
        ),
        Ok(None) => failure(prompter.writer(), &format!("Книга с ID {} не найдена", id)),
        Err(e) => failure(
            prompter.writer(),
            &format!("Не удалось изменить статус: {}", e),
        ),
    }
}

fn success<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("✓").green().bold(), message)
}

fn failure<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("✗").red().bold(), message)
}
