//! subdomain enable and disable

use zaia::errors::{CliError, ErrorCode};

use crate::harness::{demo_platform, Harness};

#[tokio::test]
async fn test_enable_starts_process() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness.run(&["subdomain", "enable", "--service", "api"]).await;
    assert_eq!(out.code, 0);
    assert_eq!(out.kind(), "async");
    assert_eq!(out.json["processes"][0]["actionName"], "enableSubdomain");
    assert_eq!(out.json["processes"][0]["serviceHostname"], "api");
}

#[tokio::test]
async fn test_already_enabled_is_sync_success() {
    let platform = demo_platform().with_error(
        "enable_subdomain_access",
        CliError::api("Bad request").with_platform_code("SubdomainAccessAlreadyEnabled"),
    );
    let harness = Harness::logged_in(platform).await;

    let out = harness.run(&["subdomain", "enable", "--service", "api"]).await;
    assert_eq!(out.code, 0, "{}", out.json);
    assert_eq!(out.kind(), "sync");
    assert_eq!(out.data()["status"], "already_enabled");
    assert_eq!(out.data()["action"], "enable");
    assert_eq!(out.data()["serviceHostname"], "api");
    assert_eq!(out.data()["serviceId"], "svc-api");
}

#[tokio::test]
async fn test_already_disabled_message() {
    let platform = demo_platform().with_error(
        "disable_subdomain_access",
        CliError::api("Subdomain access is already disabled"),
    );
    let harness = Harness::logged_in(platform).await;

    let out = harness.run(&["subdomain", "disable", "--service", "api"]).await;
    assert_eq!(out.code, 0);
    assert_eq!(out.data()["status"], "already_disabled");
}

#[tokio::test]
async fn test_other_failures_surface() {
    let platform = demo_platform().with_error(
        "enable_subdomain_access",
        CliError::api("Internal failure").with_platform_code("internalServerError"),
    );
    let harness = Harness::logged_in(platform).await;

    let out = harness.run(&["subdomain", "enable", "--service", "api"]).await;
    assert_eq!(out.code, 1);
    assert_eq!(out.error_code(), "API_ERROR");
}

#[tokio::test]
async fn test_opposite_state_not_absorbed() {
    let platform = demo_platform().with_error(
        "disable_subdomain_access",
        CliError::new(ErrorCode::ApiError, "already enabled"),
    );
    let harness = Harness::logged_in(platform).await;

    let out = harness.run(&["subdomain", "disable", "--service", "api"]).await;
    assert_eq!(out.kind(), "error");
}

#[tokio::test]
async fn test_non_api_failures_become_api_error() {
    let platform = demo_platform().with_error(
        "enable_subdomain_access",
        CliError::new(ErrorCode::PermissionDenied, "forbidden")
            .with_suggestion("Check token permissions for this project"),
    );
    let harness = Harness::logged_in(platform).await;

    let out = harness.run(&["subdomain", "enable", "--service", "api"]).await;
    assert_eq!(out.code, 1);
    assert_eq!(out.error_code(), "API_ERROR");
    assert_eq!(out.json["error"], "forbidden");
    assert_eq!(out.json["suggestion"], "Check token permissions for this project");
}
