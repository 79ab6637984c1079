//! Query E2E tests: learnings decoding, filtering and limits over HTTP.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use condensate_client::{Assertion, LEARNINGS_PATH};
use e2e_tests::{legacy_learning, legacy_learnings, TestHarness, TEST_API_KEY};

#[tokio::test]
async fn test_legacy_record_maps_exactly() {
    let harness = TestHarness::new().await;
    harness
        .mount_learnings(json!([
            {"id": "a1", "statement": "cats are mammals", "confidence": 0.9, "status": "active"}
        ]))
        .await;

    let assertions = harness.client.query_assertions("").await.unwrap();

    assert_eq!(
        assertions,
        vec![Assertion {
            id: "a1".to_string(),
            project_id: String::new(),
            subject_text: String::new(),
            predicate: String::new(),
            object_text: String::new(),
            confidence: 0.9,
            status: "active".to_string(),
            formatted: Some("cats are mammals".to_string()),
        }]
    );
}

#[tokio::test]
async fn test_query_sends_get_with_headers_and_no_body() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path(LEARNINGS_PATH))
        .and(header("content-type", "application/json"))
        .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&harness.server)
        .await;

    let assertions = harness.client.query_assertions("anything").await.unwrap();

    assert!(assertions.is_empty());
    let requests = harness.server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_query_preserves_server_order() {
    let harness = TestHarness::new().await;
    harness.mount_learnings(legacy_learnings(25, "Fact")).await;

    let assertions = harness.client.query_assertions("").await.unwrap();

    let ids: Vec<String> = assertions.into_iter().map(|a| a.id).collect();
    let expected: Vec<String> = (0..25).map(|i| format!("a{}", i)).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_query_filters_client_side() {
    let harness = TestHarness::new().await;
    harness
        .mount_learnings(json!([
            legacy_learning("a1", "User prefers Rust for services", 0.8, "active"),
            legacy_learning("a2", "User drinks coffee", 0.6, "active"),
            legacy_learning("a3", "Team adopted rust-analyzer", 0.4, "superseded"),
        ]))
        .await;

    let assertions = harness.client.query_assertions(" rust ").await.unwrap();

    let ids: Vec<&str> = assertions.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a3"]);
}

#[tokio::test]
async fn test_mixed_shapes_in_one_response() {
    let harness = TestHarness::new().await;
    harness
        .mount_learnings(json!([
            legacy_learning("a1", "cats are mammals", 0.9, "active"),
            {
                "id": "a2",
                "project_id": "proj-1",
                "subject_text": "User",
                "predicate": "lives in",
                "object_text": "Lisbon",
                "confidence": 0.7,
                "status": "contested"
            }
        ]))
        .await;

    let assertions = harness.client.query_assertions("lisbon").await.unwrap();

    assert_eq!(assertions.len(), 1);
    let a = &assertions[0];
    assert_eq!(a.project_id, "proj-1");
    assert_eq!(a.display_text(), "User lives in Lisbon");
    assert!(a.formatted.is_none());
}

#[tokio::test]
async fn test_list_assertions_passes_limit() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path(LEARNINGS_PATH))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(legacy_learnings(2, "Capped")))
        .expect(1)
        .mount(&harness.server)
        .await;

    let assertions = harness.client.list_assertions(Some(2)).await.unwrap();

    assert_eq!(assertions.len(), 2);
}

#[tokio::test]
async fn test_stats_and_memories() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_projects": 1,
            "total_memories": 2,
            "total_learnings": 5,
            "total_keys": 1,
            "total_entities": 0,
            "total_relations": 0,
            "pending_review": 1
        })))
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/memories"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "m2", "content": "second", "project_id": "p", "created_at": "2026-01-02T00:00:00", "type": "api"},
            {"id": "m1", "content": "first", "project_id": "p", "created_at": "2026-01-01T00:00:00", "type": "note"}
        ])))
        .mount(&harness.server)
        .await;

    let stats = harness.client.stats().await.unwrap();
    let memories = harness.client.list_memories(Some(50)).await.unwrap();

    assert_eq!(stats.total_learnings, 5);
    assert_eq!(stats.pending_review, 1);
    assert_eq!(memories.len(), 2);
    assert_eq!(memories[0].id, "m2");
    assert_eq!(memories[1].source, "note");
}

#[tokio::test]
async fn test_recall_round_trip() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/memory/retrieve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "You moved to Lisbon in 2025.",
            "sources": ["m1", "m7"],
            "strategy": "hybrid"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let response = harness
        .client
        .recall("proj-1", "where do I live?")
        .await
        .unwrap();

    assert_eq!(response.strategy, "hybrid");
    assert_eq!(response.sources.len(), 2);
    let requests = harness.server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"project_id": "proj-1", "query": "where do I live?"}));
}
