//! Condensate client for ingesting items and querying assertions.

use std::sync::Arc;

use reqwest::Method;
use tracing::{debug, info};

use condensate_types::{
    Assertion, EpisodicItem, MemoryRecord, RetrieveRequest, RetrieveResponse, StoreStats,
};

use crate::adapter::{decode_assertions, decode_memories, decode_object};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::{HttpTransport, Transport};

/// Ingest endpoint for episodic items.
pub const MEMORIES_PATH: &str = "/api/admin/memories";

/// Assertion ("learning") listing endpoint.
pub const LEARNINGS_PATH: &str = "/api/admin/learnings";

/// Store statistics endpoint.
pub const STATS_PATH: &str = "/api/admin/stats";

/// Memory router retrieval endpoint.
pub const RETRIEVE_PATH: &str = "/api/v1/memory/retrieve";

/// Client for the Condensate memory store.
///
/// Holds only immutable configuration and a shareable transport, so one
/// instance (or its clones) can serve concurrent calls.
#[derive(Clone)]
pub struct CondensateClient {
    transport: Arc<dyn Transport>,
}

impl CondensateClient {
    /// Create a client over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidConfig` if the base URL or key is unusable.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        info!(base_url = config.base_url(), "Creating Condensate client");
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client from a base URL and API key (empty key = unauthenticated).
    pub fn from_url(base_url: &str, api_key: &str) -> Result<Self, ClientError> {
        Self::new(ClientConfig::new(base_url).with_api_key(api_key))
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Ingest an episodic item.
    ///
    /// Issues `POST /api/admin/memories`. Any status below 400 is success and
    /// the response body is discarded.
    pub async fn add_item(&self, item: &EpisodicItem) -> Result<(), ClientError> {
        item.validate().map_err(ClientError::InvalidItem)?;
        let body = serde_json::to_vec(item).map_err(ClientError::Serialization)?;

        debug!(project_id = %item.project_id, source = %item.source, "Ingesting item");
        self.execute(Method::POST, MEMORIES_PATH, Some(body)).await?;
        Ok(())
    }

    /// Query assertions matching `query`.
    ///
    /// The learnings endpoint does not filter server-side, so the full
    /// collection is fetched and filtered here: an assertion matches when its
    /// display text contains the trimmed query, ignoring case. A blank query
    /// returns every assertion. Server order is preserved.
    pub async fn query_assertions(&self, query: &str) -> Result<Vec<Assertion>, ClientError> {
        let assertions = self.fetch_assertions(LEARNINGS_PATH.to_string()).await?;
        let total = assertions.len();
        let matched = filter_assertions(assertions, query);
        debug!(total, matched = matched.len(), "Filtered assertions");
        Ok(matched)
    }

    /// List assertions without filtering, optionally capped server-side.
    pub async fn list_assertions(&self, limit: Option<u32>) -> Result<Vec<Assertion>, ClientError> {
        self.fetch_assertions(with_limit(LEARNINGS_PATH, limit)).await
    }

    /// List ingested memories, newest first as ordered by the server.
    pub async fn list_memories(&self, limit: Option<u32>) -> Result<Vec<MemoryRecord>, ClientError> {
        let body = self
            .execute(Method::GET, &with_limit(MEMORIES_PATH, limit), None)
            .await?;
        decode_memories(&body)
    }

    /// Fetch store-wide counters.
    pub async fn stats(&self) -> Result<StoreStats, ClientError> {
        let body = self.execute(Method::GET, STATS_PATH, None).await?;
        decode_object(&body, "stats")
    }

    /// Ask the memory router a question.
    pub async fn retrieve(&self, request: &RetrieveRequest) -> Result<RetrieveResponse, ClientError> {
        let body = serde_json::to_vec(request).map_err(ClientError::Serialization)?;
        let response = self.execute(Method::POST, RETRIEVE_PATH, Some(body)).await?;
        decode_object(&response, "retrieve")
    }

    /// Convenience wrapper around [`CondensateClient::retrieve`].
    pub async fn recall(
        &self,
        project_id: &str,
        query: &str,
    ) -> Result<RetrieveResponse, ClientError> {
        self.retrieve(&RetrieveRequest::new(project_id, query)).await
    }

    async fn fetch_assertions(&self, path: String) -> Result<Vec<Assertion>, ClientError> {
        let body = self.execute(Method::GET, &path, None).await?;
        let assertions = decode_assertions(&body)?;
        debug!(count = assertions.len(), "Decoded assertions");
        Ok(assertions)
    }

    /// Send a request and return the body, failing on status >= 400.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, ClientError> {
        let response = self.transport.send(method, path, body).await?;
        if response.is_error() {
            debug!(path, status = response.status, "Request rejected");
            return Err(ClientError::Request {
                status: response.status,
            });
        }
        Ok(response.body)
    }
}

/// Append a `limit` query parameter when one is given.
fn with_limit(path: &str, limit: Option<u32>) -> String {
    match limit {
        Some(limit) => format!("{}?limit={}", path, limit),
        None => path.to_string(),
    }
}

/// Keep assertions whose display text contains `query`, ignoring case.
///
/// A blank query keeps everything.
pub fn filter_assertions(assertions: Vec<Assertion>, query: &str) -> Vec<Assertion> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return assertions;
    }
    assertions
        .into_iter()
        .filter(|a| a.display_text().to_lowercase().contains(&needle))
        .collect()
}
