//! Error types for the condensate-types crate.

use thiserror::Error;

/// Error type for settings loading and value parsing.
#[derive(Debug, Error)]
pub enum CondensateError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
