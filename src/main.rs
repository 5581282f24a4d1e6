//! # Beer Catalog CLI (`beers`)
//!
//! ## Usage
//!
//! ```bash
//! beers --config ./config/beers.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `beers migrate` | Drop and rebuild the catalog table from the data directory |
//! | `beers list` | List beers, optionally filtered by name, malt, food, or ibu |
//! | `beers get <id>` | Print one beer by id |
//! | `beers serve` | Rebuild the catalog, then start the HTTP server |
//!
//! Logs go to stderr; set `RUST_LOG` to change the level (default `info`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use beer_catalog::catalog::filter::FilterSet;
use beer_catalog::{config, get, list, migrate, server};

/// Beer Catalog CLI — rebuilds a flat beer table from nested JSON documents
/// and serves it over HTTP.
#[derive(Parser)]
#[command(name = "beers", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/beers.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop and rebuild the catalog table.
    ///
    /// Reads every JSON document under `[source].root`, flattens it, and
    /// inserts it. Rows that fail are listed in the report; the run still
    /// succeeds.
    Migrate,

    /// List beers in the catalog.
    ///
    /// All filters are optional and combined with AND. Order is not
    /// guaranteed.
    List {
        /// Substring match on the beer name.
        #[arg(long)]
        name: Option<String>,

        /// Substring match on the first malt.
        #[arg(long)]
        malt: Option<String>,

        /// Substring match on the first food pairing.
        #[arg(long)]
        food: Option<String>,

        /// Exact match on IBU.
        #[arg(long)]
        ibu: Option<f64>,

        /// Print rows as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print one beer by id.
    Get {
        id: i64,

        /// Print the row as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Rebuild the catalog, then start the HTTP server.
    Serve,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Migrate => {
            migrate::run_migrate(&cfg).await?;
        }
        Commands::List {
            name,
            malt,
            food,
            ibu,
            json,
        } => {
            let filters = FilterSet {
                name,
                malt,
                food,
                ibu,
            };
            list::run_list(&cfg, filters, json).await?;
        }
        Commands::Get { id, json } => {
            get::run_get(&cfg, id, json).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
