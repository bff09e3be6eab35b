mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use evcal_core::EventStore;
use evcal_core::config::EvcalConfig;
use evcal_core::storage::FileStorage;
use tracing_subscriber::EnvFilter;

use crate::commands::EventFields;

#[derive(Parser)]
#[command(name = "evcal")]
#[command(about = "Schedule events on a month calendar")]
struct Cli {
    /// Directory holding the event list (overrides data_dir from config.toml)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the calendar grid for a month
    Month {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Go back this many months
        #[arg(long, conflicts_with = "next")]
        prev: Option<u32>,

        /// Go forward this many months
        #[arg(long)]
        next: Option<u32>,
    },
    /// List events, optionally filtered by name
    List {
        /// Only show events whose name contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add an event
    Add {
        #[command(flatten)]
        fields: EventFields,
    },
    /// Change fields of an existing event
    Edit {
        /// Event id (any unique prefix)
        id: String,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event
    Delete {
        /// Event id (any unique prefix)
        id: String,
    },
    /// Export all events as iCalendar
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Month { month, prev, next } => {
            let store = open_store(cli.data_dir)?;
            commands::month::run(&store, month.as_deref(), prev, next)
        }
        Commands::List { search } => {
            let mut store = open_store(cli.data_dir)?;
            commands::list::run(&mut store, search)
        }
        Commands::Add { fields } => {
            let mut store = open_store(cli.data_dir)?;
            commands::add::run(&mut store, fields)
        }
        Commands::Edit { id, fields } => {
            let mut store = open_store(cli.data_dir)?;
            commands::edit::run(&mut store, &id, fields)
        }
        Commands::Delete { id } => {
            let mut store = open_store(cli.data_dir)?;
            commands::delete::run(&mut store, &id)
        }
        Commands::Export { output } => {
            let store = open_store(cli.data_dir)?;
            commands::export::run(&store, output.as_deref())
        }
    }
}

/// Log to stderr, filtered by `EVCAL_LOG` (e.g. `EVCAL_LOG=debug`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("EVCAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(data_dir: Option<PathBuf>) -> Result<EventStore<FileStorage>> {
    let config = EvcalConfig::load()?;

    let storage = match data_dir {
        Some(dir) => FileStorage::new(dir),
        None => config.storage(),
    };

    tracing::debug!(dir = %storage.dir().display(), key = %config.storage_key, "opening event store");
    Ok(EventStore::open_with_key(storage, &config.storage_key))
}
