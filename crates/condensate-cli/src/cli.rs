//! CLI argument parsing for the condensate binary.
//!
//! CLI flags override all other config sources.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use condensate_types::Source;

/// Condensate memory store client
///
/// Ingest raw text and inspect the facts the store has learned.
#[derive(Parser, Debug)]
#[command(name = "condensate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/condensate/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Base URL of the memory store (overrides CONDENSATE_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API key (overrides CONDENSATE_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Client commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Ingest a new memory
    Ingest {
        /// Text to ingest (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Project to ingest into (default from config)
        #[arg(short, long)]
        project: Option<String>,

        /// Item source: chatgpt_export, api, tool or note
        #[arg(short, long, default_value = "note")]
        source: Source,

        /// When the remembered event happened (RFC 3339)
        #[arg(long)]
        occurred_at: Option<DateTime<Utc>>,

        /// Metadata entry as key=value; JSON values are kept typed
        #[arg(short, long = "meta", value_parser = parse_key_value)]
        meta: Vec<(String, String)>,
    },

    /// List learned assertions, optionally filtered by text
    Learnings {
        /// Filter text (case-insensitive substring match)
        query: Vec<String>,

        /// Maximum results requested from the server
        #[arg(short = 'n', long)]
        limit: Option<u32>,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Ask the memory router a question
    Recall {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Project to search (default from config)
        #[arg(short, long)]
        project: Option<String>,
    },

    /// List recently ingested memories
    Memories {
        /// Maximum results
        #[arg(short = 'n', long, default_value = "20")]
        limit: u32,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show store statistics
    Stats,

    /// Show configured endpoint and check connectivity
    Status,
}

/// Parse a `key=value` pair.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value: no '=' in '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid key=value: empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}
