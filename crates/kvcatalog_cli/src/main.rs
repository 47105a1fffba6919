//! kvcatalog CLI
//!
//! Command-line client for a key-value backed book catalog.
//!
//! # Commands
//!
//! - `add` - Create a record
//! - `show` - Display one record
//! - `edit` - Change fields of a record
//! - `delete` - Remove a record
//! - `list` - Display every record, ordered by id
//! - `search` - Display records matching a term
//! - `ping` - Check that the backend is reachable

mod commands;

use clap::{Parser, Subcommand};
use commands::BackendArgs;
use kvcatalog_core::{RecordId, Status};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Book catalog over Redis, KeyDB or a local file.
#[derive(Parser)]
#[command(name = "kvcatalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server URL (redis://[:password@]host:port/db); overrides host/port/password
    #[arg(global = true, long)]
    url: Option<String>,

    /// Server host [env: KEYDB_HOST]
    #[arg(global = true, long)]
    host: Option<String>,

    /// Server port [env: KEYDB_PORT]
    #[arg(global = true, long)]
    port: Option<u16>,

    /// Server password [env: KEYDB_PASSWORD]
    #[arg(global = true, long)]
    password: Option<String>,

    /// Use a local JSON data file instead of a server
    #[arg(global = true, short, long)]
    file: Option<PathBuf>,

    /// Key prefix for records
    #[arg(global = true, long, default_value = kvcatalog_core::DEFAULT_KEY_PREFIX)]
    prefix: String,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a record
    Add {
        /// Title
        #[arg(short, long)]
        title: String,

        /// Author
        #[arg(short, long)]
        author: String,

        /// Genre
        #[arg(short, long)]
        genre: String,

        /// Status (pending, in_progress, read)
        #[arg(short, long, default_value = "pending")]
        status: Status,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Display one record
    Show {
        /// Record id
        id: RecordId,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Change fields of a record; omitted fields keep their value
    Edit {
        /// Record id
        id: RecordId,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New author
        #[arg(short, long)]
        author: Option<String>,

        /// New genre
        #[arg(short, long)]
        genre: Option<String>,

        /// New status (pending, in_progress, read)
        #[arg(short, long)]
        status: Option<Status>,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Delete a record
    Delete {
        /// Record id
        id: RecordId,
    },

    /// Display every record, ordered by id
    List {
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Display records whose title, author or genre contains a term
    Search {
        /// Search term; empty matches everything
        #[arg(default_value = "")]
        term: String,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check that the backend is reachable
    Ping,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let backend = BackendArgs {
        url: cli.url,
        host: cli.host,
        port: cli.port,
        password: cli.password,
        file: cli.file,
        prefix: cli.prefix,
    };

    match cli.command {
        Commands::Add {
            title,
            author,
            genre,
            status,
            format,
        } => {
            let store = backend.open()?;
            commands::add::run(&store, title, author, genre, status, &format)?;
        }
        Commands::Show { id, format } => {
            let store = backend.open()?;
            commands::show::run(&store, id, &format)?;
        }
        Commands::Edit {
            id,
            title,
            author,
            genre,
            status,
            format,
        } => {
            let store = backend.open()?;
            let patch = kvcatalog_core::RecordPatch {
                title,
                author,
                genre,
                status,
            };
            commands::edit::run(&store, id, patch, &format)?;
        }
        Commands::Delete { id } => {
            let store = backend.open()?;
            commands::delete::run(&store, id)?;
        }
        Commands::List { format } => {
            let store = backend.open()?;
            commands::list::run(&store, &format)?;
        }
        Commands::Search { term, format } => {
            let store = backend.open()?;
            commands::search::run(&store, &term, &format)?;
        }
        Commands::Ping => {
            commands::ping::run(&backend)?;
        }
        Commands::Version => {
            println!("kvcatalog CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("kvcatalog Core v{}", kvcatalog_core::VERSION);
        }
    }

    Ok(())
}
