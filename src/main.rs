//! # Campus Search CLI (`campus-search`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `campus-search init` | Create the SQLite database |
//! | `campus-search sources` | List searchable sources and document counts |
//! | `campus-search import <collection> <file>` | Load a JSON export into a collection |
//! | `campus-search import --dir <dir>` | Load every `<collection>.json` in a directory |
//! | `campus-search search "<query>"` | Run a federated search |
//! | `campus-search serve` | Start the HTTP server |
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use campus_search::{config, import, migrate, search, server, sources};

/// Federated search service for a university website.
#[derive(Parser)]
#[command(name = "campus-search", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/campus.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema. Idempotent.
    Init,

    /// List searchable sources with their storage shape and document count.
    Sources,

    /// Import documents from JSON exports.
    ///
    /// A file holds one object or an array of objects. Each document's
    /// `_id` is its key; re-importing an `_id` replaces the document.
    Import {
        /// Target collection (e.g. `programs`, `news`, `admissions`).
        #[arg(required_unless_present = "dir", requires = "file")]
        collection: Option<String>,

        /// JSON file to import.
        file: Option<PathBuf>,

        /// Import every `<collection>.json` below this directory instead.
        #[arg(long, conflicts_with_all = ["collection", "file"])]
        dir: Option<PathBuf>,
    },

    /// Search all sources.
    Search {
        /// The search query string.
        query: String,

        /// Maximum number of results to return.
        #[arg(long)]
        limit: Option<usize>,

        /// Print the HTTP response body instead of a listing.
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Sources => {
            sources::list_sources(&cfg).await?;
        }
        Commands::Import {
            collection,
            file,
            dir,
        } => match (dir, collection, file) {
            (Some(dir), _, _) => import::run_import_dir(&cfg, &dir).await?,
            (None, Some(collection), Some(file)) => {
                import::run_import(&cfg, &collection, &file).await?
            }
            _ => anyhow::bail!("import needs <collection> <file> or --dir <dir>"),
        },
        Commands::Search { query, limit, json } => {
            search::run_search(&cfg, &query, limit, json).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
