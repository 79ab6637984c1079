//! Assertion type returned by the learnings endpoint.
//!
//! Assertions are facts the store has derived from ingested items. The
//! server may report them in a flat legacy shape (a single pre-formatted
//! statement) or in the structured subject/predicate/object shape; both
//! produce the same type, with fields the shape lacks left empty.

use serde::{Deserialize, Serialize};

/// A learned fact with a confidence score and lifecycle status.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Assertion {
    /// Server-assigned identifier
    pub id: String,

    /// Owning project (empty for the legacy shape)
    #[serde(default)]
    pub project_id: String,

    /// Subject of the fact
    #[serde(default)]
    pub subject_text: String,

    /// Relation between subject and object
    #[serde(default)]
    pub predicate: String,

    /// Object of the fact
    #[serde(default)]
    pub object_text: String,

    /// Confidence, nominally in [0, 1] (not validated)
    pub confidence: f64,

    /// Server-defined lifecycle tag (e.g. "active", "superseded")
    pub status: String,

    /// Pre-formatted statement for display
    #[serde(
        default,
        rename = "formatted_statement",
        skip_serializing_if = "Option::is_none"
    )]
    pub formatted: Option<String>,
}

impl Assertion {
    /// Whether the structured subject/predicate/object fields are populated.
    pub fn is_structured(&self) -> bool {
        !(self.subject_text.is_empty() && self.predicate.is_empty() && self.object_text.is_empty())
    }

    /// Human-readable statement.
    ///
    /// Uses the formatted statement when present, otherwise joins the
    /// non-empty parts of the subject/predicate/object triple.
    pub fn display_text(&self) -> String {
        if let Some(formatted) = &self.formatted {
            return formatted.clone();
        }
        [
            self.subject_text.as_str(),
            self.predicate.as_str(),
            self.object_text.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

impl std::fmt::Display for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} (confidence {:.2}, {})",
            self.id,
            self.display_text(),
            self.confidence,
            self.status
        )
    }
}
