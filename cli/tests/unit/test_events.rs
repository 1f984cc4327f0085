//! events

use zaia::errors::CliError;
use zaia::models::activity::{AppVersionEvent, BuildInfo};
use zaia::models::process::{Process, ServiceStackRef};

use crate::harness::{demo_platform, Harness, PROJECT_ID};

fn process(id: &str, service_id: &str, name: &str, created: &str) -> Process {
    Process {
        id: id.to_string(),
        action_name: "serviceStackRestart".to_string(),
        status: "DONE".to_string(),
        service_stacks: vec![ServiceStackRef {
            id: service_id.to_string(),
            name: name.to_string(),
        }],
        created: created.to_string(),
        started: Some(created.to_string()),
        finished: Some("2026-01-10T12:30:00Z".to_string()),
        failure_reason: None,
    }
}

fn build(service_id: &str, created: &str) -> AppVersionEvent {
    AppVersionEvent {
        id: format!("av-{created}"),
        project_id: PROJECT_ID.to_string(),
        service_stack_id: service_id.to_string(),
        source: "GIT".to_string(),
        status: "ACTIVE".to_string(),
        sequence: 3,
        build: Some(BuildInfo {
            pipeline_start: Some("2026-01-10T11:00:00Z".to_string()),
            pipeline_finish: Some("2026-01-10T11:01:30Z".to_string()),
            pipeline_failed: None,
        }),
        created: created.to_string(),
        last_update: created.to_string(),
    }
}

fn platform() -> zaia::platform::memory::MemoryPlatform {
    demo_platform()
        .with_process(process("p1", "svc-api", "api", "2026-01-10T10:00:00Z"))
        .with_process(process("p2", "svc-db", "db", "2026-01-10T12:00:00Z"))
        .with_app_versions(vec![build("svc-api", "2026-01-10T11:00:00Z")])
}

#[tokio::test]
async fn test_timeline_sorted_newest_first() {
    let harness = Harness::logged_in(platform()).await;
    let out = harness.run(&["events"]).await;
    assert_eq!(out.code, 0, "{}", out.json);
    assert_eq!(out.data()["projectId"], PROJECT_ID);

    let events = out.data()["events"].as_array().unwrap();
    let timestamps: Vec<&str> = events
        .iter()
        .map(|e| e["timestamp"].as_str().unwrap())
        .collect();
    assert_eq!(
        timestamps,
        vec![
            "2026-01-10T12:00:00Z",
            "2026-01-10T11:00:00Z",
            "2026-01-10T10:00:00Z"
        ]
    );
    assert_eq!(events[1]["type"], "build");
    assert_eq!(events[1]["detail"], "Build v3 from GIT");
    assert_eq!(events[1]["duration"], "1m30s");
    assert_eq!(events[2]["action"], "restart");
    assert_eq!(events[2]["status"], "FINISHED");
    assert_eq!(events[2]["user"], "system");

    assert_eq!(out.data()["summary"]["total"], 3);
    assert_eq!(out.data()["summary"]["processes"], 2);
    assert_eq!(out.data()["summary"]["deploys"], 1);
}

#[tokio::test]
async fn test_filter_and_limit() {
    let harness = Harness::logged_in(platform()).await;

    let out = harness.run(&["events", "--service", "api"]).await;
    let events = out.data()["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e["service"] == "api"));

    let out = harness.run(&["events", "--limit", "1"]).await;
    let events = out.data()["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["service"], "db");
}

#[tokio::test]
async fn test_any_failed_source_fails_all() {
    let platform = platform().with_error("search_app_versions", CliError::api("boom"));
    let harness = Harness::logged_in(platform).await;

    let out = harness.run(&["events"]).await;
    assert_eq!(out.code, 1);
    assert_eq!(out.error_code(), "API_ERROR");
    assert!(out.json.get("data").is_none());
}
