//! Episodic item type for ingestion.
//!
//! An episodic item is a unit of raw input text submitted to the memory
//! store. It has no identity of its own; the server assigns one on ingest.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CondensateError;

/// Where an episodic item originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Imported from a ChatGPT conversation export
    ChatgptExport,
    /// Submitted programmatically through the API
    Api,
    /// Captured by an originating tool
    Tool,
    /// Manual note
    Note,
}

impl Source {
    /// Wire tag for this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::ChatgptExport => "chatgpt_export",
            Source::Api => "api",
            Source::Tool => "tool",
            Source::Note => "note",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = CondensateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chatgpt_export" => Ok(Source::ChatgptExport),
            "api" => Ok(Source::Api),
            "tool" => Ok(Source::Tool),
            "note" => Ok(Source::Note),
            other => Err(CondensateError::InvalidInput(format!(
                "unknown source '{}' (expected chatgpt_export, api, tool or note)",
                other
            ))),
        }
    }
}

/// A record to be ingested into the episodic store.
///
/// Serializes to the body of `POST /api/admin/memories`. Optional fields are
/// omitted from the JSON when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodicItem {
    /// Project the item belongs to
    pub project_id: String,

    /// Originating channel
    pub source: Source,

    /// Text body
    pub text: String,

    /// When the underlying event happened (RFC 3339 on the wire)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,

    /// Free-form metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl EpisodicItem {
    /// Create a new item with the required fields.
    pub fn new(project_id: impl Into<String>, source: Source, text: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            source,
            text: text.into(),
            occurred_at: None,
            metadata: None,
        }
    }

    /// Set the occurrence timestamp.
    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }

    /// Replace the metadata map.
    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Add a single metadata entry, creating the map if needed.
    pub fn with_metadata_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Check required fields before the item is sent.
    pub fn validate(&self) -> Result<(), String> {
        if self.project_id.trim().is_empty() {
            return Err("project_id must not be empty".to_string());
        }
        if self.text.trim().is_empty() {
            return Err("text must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_serialize_required_fields_only() {
        let item = EpisodicItem::new("proj-1", Source::Api, "hello");
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(
            value,
            json!({"project_id": "proj-1", "source": "api", "text": "hello"})
        );
    }

    #[test]
    fn test_serialize_optional_fields() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 30, 12, 0, 0).unwrap();
        let item = EpisodicItem::new("proj-1", Source::ChatgptExport, "hello")
            .with_occurred_at(ts)
            .with_metadata_entry("conversation", "c-42")
            .with_metadata_entry("turn", 3);

        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["source"], "chatgpt_export");
        assert_eq!(value["occurred_at"], "2026-01-30T12:00:00Z");
        assert_eq!(value["metadata"]["conversation"], "c-42");
        assert_eq!(value["metadata"]["turn"], 3);
    }

    #[test]
    fn test_nested_metadata_preserved() {
        let item = EpisodicItem::new("proj-1", Source::Tool, "ran tests")
            .with_metadata_entry("result", json!({"passed": 12, "failed": [], "ok": true}));

        let json = serde_json::to_string(&item).unwrap();
        let decoded: EpisodicItem = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, item);
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        assert!(EpisodicItem::new("proj-1", Source::Note, "text")
            .validate()
            .is_ok());

        let err = EpisodicItem::new("  ", Source::Note, "text")
            .validate()
            .unwrap_err();
        assert!(err.contains("project_id"));

        let err = EpisodicItem::new("proj-1", Source::Note, "")
            .validate()
            .unwrap_err();
        assert!(err.contains("text"));
    }

    #[test]
    fn test_source_parse() {
        assert_eq!("note".parse::<Source>().unwrap(), Source::Note);
        assert_eq!("API".parse::<Source>().unwrap(), Source::Api);
        assert_eq!(
            "chatgpt_export".parse::<Source>().unwrap(),
            Source::ChatgptExport
        );
        assert!("cli".parse::<Source>().is_err());
    }

    #[test]
    fn test_source_display_matches_wire_tag() {
        for source in [Source::ChatgptExport, Source::Api, Source::Tool, Source::Note] {
            let wire = serde_json::to_value(source).unwrap();
            assert_eq!(wire, source.to_string());
        }
    }
}
