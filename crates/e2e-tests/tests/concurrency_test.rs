//! Concurrent use of one client instance.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use condensate_client::LEARNINGS_PATH;
use e2e_tests::{legacy_learnings, sample_item, TestHarness};

/// Two concurrent queries on the same client return independent, ordered results.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_queries_do_not_interfere() {
    let harness = TestHarness::new().await;
    harness.mount_learnings(legacy_learnings(40, "Stable")).await;

    let (first, second) = tokio::join!(
        harness.client.query_assertions(""),
        harness.client.query_assertions("")
    );
    let first = first.unwrap();
    let second = second.unwrap();

    let expected: Vec<String> = (0..40).map(|i| format!("a{}", i)).collect();
    let ids = |v: &[condensate_client::Assertion]| v.iter().map(|a| a.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&first), expected);
    assert_eq!(ids(&second), expected);
    assert_eq!(first, second);
}

/// Cloned clients spawned on separate tasks see only their own responses.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_spawned_tasks_with_different_limits() {
    let harness = TestHarness::new().await;
    for limit in [3usize, 7, 11] {
        Mock::given(method("GET"))
            .and(path(LEARNINGS_PATH))
            .and(query_param("limit", limit.to_string().as_str()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(legacy_learnings(limit, "Limited")),
            )
            .expect(1)
            .mount(&harness.server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/api/admin/memories"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&harness.server)
        .await;

    let mut handles = Vec::new();
    for limit in [3u32, 7, 11] {
        let client = harness.client.clone();
        handles.push(tokio::spawn(async move {
            (limit, client.list_assertions(Some(limit)).await)
        }));
    }
    let ingest_client = harness.client.clone();
    let ingest = tokio::spawn(async move { ingest_client.add_item(&sample_item("p")).await });

    for handle in handles {
        let (limit, result) = handle.await.unwrap();
        assert_eq!(result.unwrap().len(), limit as usize);
    }
    ingest.await.unwrap().unwrap();
}
