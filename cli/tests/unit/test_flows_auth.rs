//! login, logout, status and usage errors

use zaia::errors::{CliError, ErrorCode};
use zaia::platform::memory::MemoryPlatform;

use crate::harness::{demo_platform, project, user, Harness, PROJECT_ID};

#[tokio::test]
async fn test_login_discover_logout() {
    let harness = Harness::new(demo_platform());

    let out = harness.run(&["login", "tok"]).await;
    assert_eq!(out.code, 0, "{}", out.json);
    assert_eq!(out.kind(), "sync");
    assert_eq!(out.data()["project"]["id"], PROJECT_ID);
    assert_eq!(out.data()["project"]["name"], "demo");
    assert_eq!(out.data()["user"]["email"], "ada@example.test");
    assert!(harness.data_file().exists());

    let out = harness.run(&["discover"]).await;
    assert_eq!(out.code, 0, "{}", out.json);
    assert_eq!(out.data()["project"]["id"], PROJECT_ID);
    let hostnames: Vec<&str> = out.data()["services"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["hostname"].as_str().unwrap())
        .collect();
    assert_eq!(hostnames, vec!["api", "db"]);

    let out = harness.run(&["logout"]).await;
    assert_eq!(out.code, 0);
    assert!(!harness.data_file().exists());

    let out = harness.run(&["discover"]).await;
    assert_eq!(out.code, 2);
    assert_eq!(out.kind(), "error");
    assert_eq!(out.error_code(), "AUTH_REQUIRED");
    assert_eq!(out.json["suggestion"], "Run: zaia login <token>");

    // logout is idempotent
    let out = harness.run(&["logout"]).await;
    assert_eq!(out.code, 0);
}

#[tokio::test]
async fn test_login_stores_region_and_host() {
    let harness = Harness::new(demo_platform());
    let out = harness
        .run(&["login", "tok", "--url", "api.example.test", "--region", "fra1"])
        .await;
    assert_eq!(out.code, 0);

    let stored = harness.ctx.store.load().await.unwrap().unwrap();
    assert_eq!(stored.token, "tok");
    assert_eq!(stored.api_host, "api.example.test");
    assert_eq!(stored.region_data.name, "fra1");
    assert!(stored.region_data.is_default);

    let out = harness.run(&["status"]).await;
    assert_eq!(out.code, 0);
    assert_eq!(out.data()["authenticated"], true);
    assert_eq!(out.data()["region"], "fra1");
    assert_eq!(out.data()["apiHost"], "api.example.test");
}

#[cfg(unix)]
#[tokio::test]
async fn test_credentials_are_private() {
    use std::os::unix::fs::PermissionsExt;

    let harness = Harness::new(demo_platform());
    harness.run(&["login", "tok"]).await;
    let mode = std::fs::metadata(harness.data_file())
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[tokio::test]
async fn test_multi_project_token_rejected() {
    let platform = MemoryPlatform::new()
        .with_user_info(user())
        .with_projects(vec![project("p1", "alpha"), project("p2", "beta")]);
    let harness = Harness::new(platform);

    let out = harness.run(&["login", "tok"]).await;
    assert_eq!(out.code, 2);
    assert_eq!(out.error_code(), "TOKEN_MULTI_PROJECT");
    assert_eq!(out.json["context"]["projects"].as_array().unwrap().len(), 2);
    assert!(!harness.data_file().exists());
}

#[tokio::test]
async fn test_no_project_token_rejected() {
    let platform = MemoryPlatform::new().with_user_info(user());
    let harness = Harness::new(platform);

    let out = harness.run(&["login", "tok"]).await;
    assert_eq!(out.code, 2);
    assert_eq!(out.error_code(), "TOKEN_NO_PROJECT");
    assert!(!harness.data_file().exists());
}

#[tokio::test]
async fn test_failed_login_keeps_previous_credentials() {
    let platform = MemoryPlatform::new()
        .with_user_info(user())
        .with_projects(vec![project("p1", "alpha"), project("p2", "beta")]);
    let harness = Harness::logged_in(platform).await;

    let out = harness.run(&["login", "other"]).await;
    assert_eq!(out.error_code(), "TOKEN_MULTI_PROJECT");

    let stored = harness.ctx.store.load().await.unwrap().unwrap();
    assert_eq!(stored.token, "tok");
    assert_eq!(stored.project.id, PROJECT_ID);
}

#[tokio::test]
async fn test_invalid_token() {
    // no user info configured: the platform rejects the token
    let harness = Harness::new(MemoryPlatform::new());
    let out = harness.run(&["login", "bad"]).await;
    assert_eq!(out.code, 2);
    assert_eq!(out.error_code(), "AUTH_INVALID_TOKEN");
}

#[tokio::test]
async fn test_login_network_error_kept() {
    let platform = demo_platform().with_error(
        "get_user_info",
        CliError::new(ErrorCode::NetworkError, "connection refused"),
    );
    let harness = Harness::new(platform);
    let out = harness.run(&["login", "tok"]).await;
    assert_eq!(out.code, 6);
    assert_eq!(out.error_code(), "NETWORK_ERROR");
}

#[tokio::test]
async fn test_status_without_login() {
    let harness = Harness::new(demo_platform());
    let out = harness.run(&["status"]).await;
    assert_eq!(out.code, 2);
    assert_eq!(out.error_code(), "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_corrupt_credentials_are_unauthenticated() {
    let harness = Harness::new(demo_platform());
    std::fs::write(harness.data_file(), "{ not json").unwrap();

    let out = harness.run(&["discover"]).await;
    assert_eq!(out.code, 2);
    assert_eq!(out.error_code(), "AUTH_REQUIRED");
    assert!(harness.platform.calls().await.is_empty());
}

#[tokio::test]
async fn test_discover_service_detail() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness.run(&["discover", "--service", "db"]).await;
    assert_eq!(out.code, 0);
    let services = out.data()["services"].as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["hostname"], "db");
    assert_eq!(services[0]["serviceId"], "svc-db");
    assert_eq!(services[0]["type"], "nodejs@22");

    let out = harness.run(&["discover", "--service", "ghost"]).await;
    assert_eq!(out.code, 4);
    assert_eq!(out.error_code(), "SERVICE_NOT_FOUND");
}

#[tokio::test]
async fn test_unknown_command_is_usage_error() {
    let harness = Harness::new(demo_platform());
    let out = harness.run(&["frobnicate"]).await;
    assert_eq!(out.code, 3);
    assert_eq!(out.error_code(), "INVALID_USAGE");
    assert_eq!(out.json["suggestion"], "Run: zaia --help");
}

#[tokio::test]
async fn test_help_is_one_sync_envelope() {
    let harness = Harness::new(demo_platform());
    let out = harness.run(&["--help"]).await;
    assert_eq!(out.code, 0);
    assert_eq!(out.kind(), "sync");
    assert!(out.data()["help"].as_str().unwrap().contains("login"));
}

#[tokio::test]
async fn test_version_needs_no_credentials() {
    let harness = Harness::new(demo_platform());
    let out = harness.run(&["version"]).await;
    assert_eq!(out.code, 0);
    assert_eq!(out.data()["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_login_project_listing_failure() {
    let platform = demo_platform().with_error(
        "list_projects",
        CliError::new(ErrorCode::PermissionDenied, "forbidden"),
    );
    let harness = Harness::new(platform);
    let out = harness.run(&["login", "tok"]).await;
    assert_eq!(out.code, 2);
    assert_eq!(out.error_code(), "AUTH_API_ERROR");
    assert!(out.json["error"].as_str().unwrap().contains("forbidden"));
    assert!(!harness.data_file().exists());
}
