// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use bookshelf_config::{Config, ConfigManager};
use bookshelf_library::LibraryManager;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io;
use std::path::PathBuf;

mod commands;
mod input;
mod menu;

fn build_cli() -> Command {
    Command::new("bookshelf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Single-user book inventory kept in a JSON file")
        .long_about("Runs an interactive menu when no subcommand is given.")
        .arg(
            Arg::new("storage")
                .short('s')
                .long("storage")
                .value_name("PATH")
                .help("Path to the library file (overrides the config)")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(Command::new("list").about("List all books in the library"))
        .subcommand(
            Command::new("add")
                .about("Add a new book to the library")
                .arg(Arg::new("title").short('t').long("title").value_name("TITLE").required(true).help("Book title"))
                .arg(Arg::new("author").short('a').long("author").value_name("AUTHOR").required(true).help("Book author"))
                .arg(
                    Arg::new("year")
                        .short('y')
                        .long("year")
                        .value_name("YEAR")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64))
                        .help("Publication year"),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a book from the library")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").allow_negative_numbers(true).value_parser(value_parser!(i64)).help("Book ID to delete")),
        )
        .subcommand(
            Command::new("search")
                .about("Search for books")
                .arg(Arg::new("keyword").required(true).value_name("KEYWORD").help("Case-insensitive substring to look for"))
                .arg(
                    Arg::new("field")
                        .short('f')
                        .long("field")
                        .value_name("FIELD")
                        .default_value("title")
                        .help("Field to search: title, author or year"),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Change the status of a book")
                .arg(Arg::new("id").required(true).value_name("BOOK_ID").allow_negative_numbers(true).value_parser(value_parser!(i64)).help("Book ID"))
                .arg(Arg::new("status").required(true).value_name("STATUS").help("New status: 'в наличии' or 'выдана'")),
        )
        .subcommand(
            Command::new("config")
                .about("Show configuration and storage locations")
                .arg(Arg::new("init").long("init").help("Write a default config file if none exists").action(ArgAction::SetTrue)),
        )
}

/// Resolves settings as defaults < config file < environment < command line
fn resolve_config<F>(matches: &ArgMatches, lookup: F) -> Result<(ConfigManager, Config)>
where
    F: Fn(&str) -> Option<String>,
{
    let manager = match matches.get_one::<PathBuf>("config-dir") {
        Some(dir) => ConfigManager::with_directory(dir.clone()),
        None => ConfigManager::new(),
    }
    .context("Failed to locate the configuration directory")?;

    let mut config = manager.load_or_default();
    ConfigManager::apply_overrides(&mut config, lookup)
        .context("Invalid environment override")?;

    if let Some(path) = matches.get_one::<PathBuf>("storage") {
        config.storage.path = path.clone();
    }

    Ok((manager, config))
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let (config_manager, config) = resolve_config(&matches, |name| std::env::var(name).ok())?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.app.log_level.as_str()),
    )
    .init();
    log::debug!("Config file: {}", config_manager.config_path().display());

    if let Some(("config", sub_matches)) = matches.subcommand() {
        return commands::show_config(&config_manager, &config, sub_matches, &mut io::stdout());
    }

    let mut library = LibraryManager::open(&config.storage.path).with_context(|| {
        format!(
            "Не удалось открыть библиотеку {}",
            config.storage.path.display()
        )
    })?;
    let mut out = io::stdout();

    match matches.subcommand() {
        Some(("list", _)) => commands::list_books(&library, &mut out),
        Some(("add", sub_matches)) => commands::add_book(&mut library, sub_matches, &mut out),
        Some(("delete", sub_matches)) => commands::delete_book(&mut library, sub_matches, &mut out),
        Some(("search", sub_matches)) => commands::search_books(&library, sub_matches, &mut out),
        Some(("status", sub_matches)) => commands::change_status(&mut library, sub_matches, &mut out),
        _ => {
            ctrlc::set_handler(|| {
                let _ = menu::interrupted(&mut io::stdout());
                std::process::exit(0);
            })
            .context("Failed to install the Ctrl-C handler")?;

            let mut prompter = input::Prompter::new(io::stdin().lock(), io::stdout());
            menu::run(&mut library, &mut prompter)
        }
    }
}
