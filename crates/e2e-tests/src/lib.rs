//! End-to-end test infrastructure for the Condensate client.
//!
//! Provides a shared TestHarness that pairs a mock memory store with a
//! client pointed at it, plus fixtures in the server's response shapes.

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use condensate_client::{ClientConfig, CondensateClient, LEARNINGS_PATH, MEMORIES_PATH};
use condensate_types::{EpisodicItem, Source};

/// API key the harness client is configured with.
pub const TEST_API_KEY: &str = "test-key-123";

/// Shared test harness for E2E tests.
///
/// The mock server lives as long as the harness; mocks mounted with
/// `.expect(n)` are verified when it drops.
pub struct TestHarness {
    pub server: MockServer,
    pub client: CondensateClient,
}

impl TestHarness {
    /// Start a mock store and an authenticated client.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let config = ClientConfig::new(server.uri()).with_api_key(TEST_API_KEY);
        let client = CondensateClient::new(config).expect("Failed to create client");
        Self { server, client }
    }

    /// Start a mock store and a client with no credential.
    pub async fn unauthenticated() -> Self {
        let server = MockServer::start().await;
        let client =
            CondensateClient::from_url(&server.uri(), "").expect("Failed to create client");
        Self { server, client }
    }

    /// Serve `body` with status 200 from the learnings endpoint.
    pub async fn mount_learnings(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path(LEARNINGS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer every ingest with `status`.
    pub async fn mount_ingest_status(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(MEMORIES_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}

/// A legacy-shape learnings record as the admin endpoint reports it.
pub fn legacy_learning(id: &str, statement: &str, confidence: f64, status: &str) -> Value {
    json!({
        "id": id,
        "statement": statement,
        "confidence": confidence,
        "status": status,
        "created_at": "2026-01-29T10:00:00"
    })
}

/// `count` legacy records with sequential ids `a0..a{count-1}`.
pub fn legacy_learnings(count: usize, base_text: &str) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                legacy_learning(
                    &format!("a{}", i),
                    &format!("{} (fact {})", base_text, i),
                    0.5,
                    "active",
                )
            })
            .collect(),
    )
}

/// A fully populated episodic item.
pub fn sample_item(project_id: &str) -> EpisodicItem {
    EpisodicItem::new(project_id, Source::ChatgptExport, "I switched the team to Rust")
        .with_occurred_at(Utc.with_ymd_and_hms(2026, 1, 29, 9, 30, 0).unwrap())
        .with_metadata_entry("conversation_id", "conv-17")
        .with_metadata_entry("turn", 4)
        .with_metadata_entry("participants", json!(["alice", "bob"]))
}
