//! logs

use zaia::models::logs::{LogAccess, LogEntry};

use crate::harness::{demo_platform, Harness};

fn entry(i: u32, severity: &str, message: &str) -> LogEntry {
    LogEntry {
        id: format!("log-{i}"),
        timestamp: format!("2026-01-10T10:00:0{i}Z"),
        severity: severity.to_string(),
        message: message.to_string(),
        container: if i % 2 == 0 { "api-1".to_string() } else { String::new() },
    }
}

fn harness() -> Harness {
    let platform = demo_platform().with_log_access(LogAccess {
        access_token: "log-token".to_string(),
        url: "GET https://logs.example.test/api/logs".to_string(),
        ..Default::default()
    });
    Harness::with_logs(
        platform,
        vec![
            entry(4, "info", "request served"),
            entry(1, "error", "connection refused"),
            entry(3, "info", "request served again"),
            entry(2, "warning", "slow query"),
        ],
    )
}

#[tokio::test]
async fn test_entries_in_order() {
    let harness = harness();
    harness.store_credentials().await;

    let out = harness.run(&["logs", "--service", "api"]).await;
    assert_eq!(out.code, 0, "{}", out.json);
    let entries = out.data()["entries"].as_array().unwrap();
    let messages: Vec<&str> = entries
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec!["connection refused", "slow query", "request served again", "request served"]
    );
    assert!(entries[0].get("container").is_none());
    assert_eq!(entries[1]["container"], "api-1");
    assert_eq!(out.data()["hasMore"], false);

    let queries = harness.logs.queries().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].service_id, "svc-api");
    assert_eq!(queries[0].severity, "all");
    assert_eq!(queries[0].limit, 100);
}

#[tokio::test]
async fn test_severity_and_limit() {
    let harness = harness();
    harness.store_credentials().await;

    let out = harness
        .run(&["logs", "--service", "api", "--severity", "INFO", "--limit", "1"])
        .await;
    assert_eq!(out.code, 0);
    let entries = out.data()["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["message"], "request served");
    assert_eq!(out.data()["hasMore"], true);
}

#[tokio::test]
async fn test_search() {
    let harness = harness();
    harness.store_credentials().await;

    let out = harness
        .run(&["logs", "--service", "api", "--search", "refused"])
        .await;
    assert_eq!(out.data()["entries"].as_array().unwrap().len(), 1);
    assert_eq!(
        harness.logs.queries().await[0].search.as_deref(),
        Some("refused")
    );
}

#[tokio::test]
async fn test_invalid_input_makes_no_calls() {
    let harness = harness();
    harness.store_credentials().await;

    for args in [
        vec!["logs", "--service", "api", "--since", "2w"],
        vec!["logs", "--service", "api", "--since", "169h"],
        vec!["logs", "--service", "api", "--severity", "fatal"],
        vec!["logs", "--service", "api", "--limit", "0"],
    ] {
        let out = harness.run(&args).await;
        assert_eq!(out.code, 3, "{args:?}");
        assert_eq!(out.error_code(), "INVALID_PARAMETER");
    }
    assert!(harness.platform.calls().await.is_empty());
    assert!(harness.logs.queries().await.is_empty());
}

#[tokio::test]
async fn test_log_access_failure() {
    let harness = Harness::with_logs(demo_platform(), vec![entry(1, "info", "x")]);
    harness.store_credentials().await;

    let out = harness.run(&["logs", "--service", "api"]).await;
    assert_eq!(out.code, 1);
    assert_eq!(out.error_code(), "API_ERROR");
    assert!(harness.logs.queries().await.is_empty());
}
