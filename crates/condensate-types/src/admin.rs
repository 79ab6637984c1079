//! Read-only admin views: ingested memories and store statistics.

use serde::{Deserialize, Serialize};

/// An ingested episodic item as listed by `GET /api/admin/memories`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: String,

    /// Item text (the server calls it `content`)
    pub content: String,

    #[serde(default)]
    pub project_id: String,

    /// Creation time as reported by the server (ISO-8601)
    #[serde(default)]
    pub created_at: String,

    /// Source tag; kept as a string since the server may report tags
    /// outside the client's [`crate::Source`] set
    #[serde(default, rename = "type")]
    pub source: String,
}

/// Store-wide counters from `GET /api/admin/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreStats {
    pub total_projects: u64,
    pub total_memories: u64,
    pub total_learnings: u64,
    pub total_keys: u64,
    pub total_entities: u64,
    pub total_relations: u64,
    /// Assertions awaiting human review
    pub pending_review: u64,
}
