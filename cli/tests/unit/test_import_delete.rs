//! import and delete

use crate::harness::{demo_platform, Harness, PROJECT_ID};

const SERVICES_YML: &str = "services:\n  - hostname: cache\n    type: valkey@7.2\n";

#[tokio::test]
async fn test_project_section_rejected_before_any_call() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness
        .run(&[
            "import",
            "--content",
            "project:\n  name: x\nservices:\n  - hostname: api\n",
        ])
        .await;
    assert_eq!(out.code, 3);
    assert_eq!(out.error_code(), "IMPORT_HAS_PROJECT");
    assert_eq!(out.json["context"]["projectId"], PROJECT_ID);
    assert!(harness.platform.calls().await.is_empty());
}

#[tokio::test]
async fn test_dry_run_previews() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness
        .run(&["import", "--content", SERVICES_YML, "--dry-run"])
        .await;
    assert_eq!(out.code, 0, "{}", out.json);
    assert_eq!(out.data()["dryRun"], true);
    assert_eq!(out.data()["valid"], true);
    assert_eq!(out.data()["services"][0]["action"], "create");
    assert_eq!(out.data()["services"][0]["hostname"], "cache");
    assert_eq!(out.data()["services"][0]["type"], "valkey@7.2");
    assert!(!harness.platform.was_called("import_services").await);
}

#[tokio::test]
async fn test_import_from_file() {
    let harness = Harness::logged_in(demo_platform()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("import.yml");
    std::fs::write(&path, SERVICES_YML).unwrap();

    let out = harness
        .run(&["import", "--file", path.to_str().unwrap()])
        .await;
    assert_eq!(out.code, 0, "{}", out.json);
    assert_eq!(out.kind(), "async");
    let process = &out.json["processes"][0];
    assert_eq!(process["actionName"], "import");
    assert_eq!(process["serviceHostname"], "cache");

    let services = harness.platform.services().await;
    assert!(services.iter().any(|s| s.hostname == "cache"));
}

#[tokio::test]
async fn test_missing_file() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness
        .run(&["import", "--file", "/nonexistent/import.yml"])
        .await;
    assert_eq!(out.code, 3);
    assert_eq!(out.error_code(), "FILE_NOT_FOUND");
}

#[tokio::test]
async fn test_import_source_required() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness.run(&["import"]).await;
    assert_eq!(out.code, 3);
    assert_eq!(out.error_code(), "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_delete_requires_confirm() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness.run(&["delete", "--service", "api"]).await;
    assert_eq!(out.code, 3);
    assert_eq!(out.error_code(), "CONFIRM_REQUIRED");
    assert_eq!(out.json["context"]["wouldDelete"]["type"], "service");
    assert_eq!(out.json["context"]["wouldDelete"]["hostname"], "api");
    assert!(harness.platform.calls().await.is_empty());
    assert_eq!(harness.platform.services().await.len(), 2);
}

#[tokio::test]
async fn test_delete_confirmed() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness
        .run(&["delete", "--service", "api", "--confirm"])
        .await;
    assert_eq!(out.code, 0, "{}", out.json);
    assert_eq!(out.json["processes"][0]["actionName"], "serviceStackDelete");

    let services = harness.platform.services().await;
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].hostname, "db");

    let out = harness.run(&["discover", "--service", "api"]).await;
    assert_eq!(out.error_code(), "SERVICE_NOT_FOUND");
}
