//! Condensate CLI
//!
//! Ingest memories into a Condensate store and inspect what it learned.
//!
//! # Usage
//!
//! ```bash
//! condensate ingest "Cats are mammals" --project proj-1
//! condensate learnings mammals
//! condensate recall "what do I know about cats?" --project proj-1
//! condensate status
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/condensate/config.toml)
//! 3. Environment variables (CONDENSATE_URL, CONDENSATE_API_KEY, ...)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use condensate_cli::{init_logging, load_settings, run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    init_logging(&settings.log_level)?;

    run(cli, &settings).await
}
