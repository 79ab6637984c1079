//! Error types for the Condensate client.

use thiserror::Error;

/// Errors that can occur when using the Condensate client.
///
/// Every operation either fully succeeds or returns exactly one of these;
/// nothing is retried or skipped.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The network call itself could not complete (DNS, refused, timeout)
    #[error("Transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request payload could not be encoded as JSON
    #[error("Serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Response body was not valid JSON or not the expected shape
    #[error("Decode failed: {0}")]
    Decode(String),

    /// A required field of one response record was missing or mistyped
    #[error("Record {index}: field '{field}' {problem}")]
    FieldType {
        index: usize,
        field: &'static str,
        problem: FieldProblem,
    },

    /// Server answered with a status >= 400
    #[error("Request failed: status {status}")]
    Request { status: u16 },

    /// Client configuration is unusable (bad URL, bad header value)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Item failed local validation before sending
    #[error("Invalid episodic item: {0}")]
    InvalidItem(String),
}

impl ClientError {
    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create an invalid-configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// HTTP status code carried by a [`ClientError::Request`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status } => Some(*status),
            _ => None,
        }
    }
}

/// What was wrong with a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
}

impl std::fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldProblem::Missing => write!(f, "is missing"),
            FieldProblem::WrongType { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
        }
    }
}
