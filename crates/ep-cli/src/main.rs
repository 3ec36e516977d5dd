use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use ep_store::{EventStore, KeyValueStore, MemoryStore, SqliteStore};
use tracing_subscriber::EnvFilter;

use ep_cli::commands::{add, calendar, categories, list, remove, summary};
use ep_cli::{Cli, Commands, Config, WarningNotifier};

type Store = EventStore<Box<dyn KeyValueStore>, WarningNotifier>;

/// Opens the configured database, ensuring the parent directory exists.
///
/// If the database cannot be opened the session continues on an in-memory
/// store; nothing written during it survives.
fn open_store(config: &Config) -> Store {
    let backend: Box<dyn KeyValueStore> = match open_backend(config) {
        Ok(db) => Box::new(db),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "falling back to in-memory storage");
            eprintln!("warning: storage unavailable, changes will not be saved ({e:#})");
            Box::new(MemoryStore::new())
        }
    };
    EventStore::load(backend, WarningNotifier)
}

fn open_backend(config: &Config) -> Result<SqliteStore> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    SqliteStore::open(&config.database_path).context("failed to open database")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let today = Local::now().date_naive();
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Add(args)) => {
            let mut store = open_store(&config);
            add::run(&mut stdout, &mut store, args, today)?;
        }
        Some(Commands::Remove(args)) => {
            let mut store = open_store(&config);
            remove::run(&mut stdout, &mut store, args)?;
        }
        Some(Commands::List(args)) => {
            let store = open_store(&config);
            list::run(&mut stdout, &store, args, today)?;
        }
        Some(Commands::Summary(args)) => {
            let store = open_store(&config);
            summary::run(&mut stdout, &store, args, config.default_period, today)?;
        }
        Some(Commands::Calendar(args)) => {
            let store = open_store(&config);
            calendar::run(&mut stdout, &store, args, today)?;
        }
        Some(Commands::Categories { json }) => {
            categories::run(&mut stdout, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
