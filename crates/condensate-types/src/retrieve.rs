//! Payloads for the memory router's retrieval endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/memory/retrieve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveRequest {
    pub project_id: String,
    pub query: String,
}

impl RetrieveRequest {
    pub fn new(project_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            query: query.into(),
        }
    }
}

/// Answer synthesized by the memory router.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieveResponse {
    /// Synthesized answer text
    pub answer: String,

    /// References to the memories the answer drew on
    pub sources: Vec<String>,

    /// Retrieval strategy the router chose
    pub strategy: String,
}
