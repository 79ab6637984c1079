//! Condensate CLI library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations over the client

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{apply_overrides, build_client, init_logging, load_settings, run};
