// FILE: crates/cli/src/commands.rs

use anyhow::{bail, Context, Result};
use bookshelf_config::{Config, ConfigManager};
use bookshelf_core::validation::validate_id;
use bookshelf_core::BookStatus;
use bookshelf_library::LibraryManager;
use clap::ArgMatches;
use console::style;
use std::io::Write;

/// List all books in the library
pub fn list_books<W: Write>(library: &LibraryManager, out: &mut W) -> Result<()> {
    if !library.is_empty() {
        writeln!(
            out,
            "\n{} книг в библиотеке",
            style(library.len()).bold().cyan()
        )?;
    }
    writeln!(out, "{}", library.render_listing())?;
    Ok(())
}

/// Add a new book to the library
pub fn add_book<W: Write>(
    library: &mut LibraryManager,
    matches: &ArgMatches,
    out: &mut W,
) -> Result<()> {
    let title = matches
        .get_one::<String>("title")
        .ok_or_else(|| anyhow::anyhow!("Title is required"))?;
    let author = matches
        .get_one::<String>("author")
        .ok_or_else(|| anyhow::anyhow!("Author is required"))?;
    let year = *matches
        .get_one::<i64>("year")
        .ok_or_else(|| anyhow::anyhow!("Year is required"))?;

    let book = library
        .add_book(title, author, year)
        .context("Не удалось добавить книгу")?;

    writeln!(
        out,
        "{} Книга '{}' успешно добавлена.",
        style("✓").green().bold(),
        book.title()
    )?;
    writeln!(out, "  ID: {}", book.id())?;
    writeln!(out, "  Автор: {}", book.author())?;
    writeln!(out, "  Год: {}", book.year())?;

    Ok(())
}

/// Delete a book from the library
pub fn delete_book<W: Write>(
    library: &mut LibraryManager,
    matches: &ArgMatches,
    out: &mut W,
) -> Result<()> {
    let id = book_id(matches)?;

    match library.delete_book(id).context("Не удалось удалить книгу")? {
        Some(book) => {
            writeln!(
                out,
                "{} Книга с ID {} успешно удалена: {}",
                style("✓").green().bold(),
                id,
                book.title()
            )?;
            Ok(())
        }
        None => bail!("Книга с ID {} не найдена", id),
    }
}

/// Search for books by one field
pub fn search_books<W: Write>(
    library: &LibraryManager,
    matches: &ArgMatches,
    out: &mut W,
) -> Result<()> {
    let keyword = matches
        .get_one::<String>("keyword")
        .ok_or_else(|| anyhow::anyhow!("Search keyword is required"))?;
    let field = matches
        .get_one::<String>("field")
        .map(|s| s.as_str())
        .unwrap_or("title");

    let found = library.search(keyword, field)?;
    if found.is_empty() {
        writeln!(out, "Книги не найдены.")?;
        return Ok(());
    }

    writeln!(
        out,
        "\n{} Результат поиска '{}' по полю {}",
        style(found.len()).bold().cyan(),
        keyword,
        field
    )?;
    writeln!(out, "{}", LibraryManager::render_books(found))?;
    Ok(())
}

/// Change the status of a book
pub fn change_status<W: Write>(
    library: &mut LibraryManager,
    matches: &ArgMatches,
    out: &mut W,
) -> Result<()> {
    let id = book_id(matches)?;
    let status_str = matches
        .get_one::<String>("status")
        .ok_or_else(|| anyhow::anyhow!("Status is required"))?;
    let status = BookStatus::from_value(status_str)?;

    match library
        .change_status(id, status)
        .context("Не удалось изменить статус")?
    {
        Some(_) => {
            writeln!(
                out,
                "{} Статус книги с ID {} изменен на '{}'",
                style("✓").green().bold(),
                id,
                status
            )?;
            Ok(())
        }
        None => bail!("Книга с ID {} не найдена", id),
    }
}

/// Show where configuration and books are stored
pub fn show_config<W: Write>(
    manager: &ConfigManager,
    config: &Config,
    matches: &ArgMatches,
    out: &mut W,
) -> Result<()> {
    if matches.get_flag("init") {
        let created = manager
            .initialize()
            .context("Failed to write default config")?;
        if created {
            writeln!(
                out,
                "{} Created {}",
                style("✓").green().bold(),
                manager.config_path().display()
            )?;
        } else {
            writeln!(
                out,
                "Config already exists at {}",
                manager.config_path().display()
            )?;
        }
    }

    writeln!(out, "\n{}", style("Configuration").bold().cyan())?;
    writeln!(out, "Config file: {}", manager.config_path().display())?;
    writeln!(out, "Storage: {}", config.storage.path.display())?;
    writeln!(out, "Log level: {}", config.app.log_level)?;
    Ok(())
}

fn book_id(matches: &ArgMatches) -> Result<bookshelf_core::BookId> {
    let raw = *matches
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow::anyhow!("Book ID is required"))?;
    Ok(validate_id(raw)?)
}
