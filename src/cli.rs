use bookscout_common::MaxResults;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookscout")]
#[command(author, version, about = "Search a book catalog and fetch cover thumbnails")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog and list matching books
    Search {
        /// Free-text query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Number of results to request (1-40)
        #[arg(short = 'n', long)]
        max_results: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

/// Pick the page size for a search.
///
/// Requests outside the catalog's accepted range fall back to the configured
/// default rather than failing the command.
pub fn resolve_max_results(requested: Option<u32>, default: MaxResults) -> MaxResults {
    match requested {
        None => default,
        Some(n) => MaxResults::new(n).unwrap_or_else(|e| {
            tracing::warn!("{e}; using {default} instead");
            default
        }),
    }
}
