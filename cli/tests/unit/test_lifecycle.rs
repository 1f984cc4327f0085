//! start, stop, restart and scale

use zaia::errors::{CliError, ErrorCode};

use crate::harness::{demo_platform, Harness};

#[tokio::test]
async fn test_start_ghost_service() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness.run(&["start", "--service", "ghost"]).await;
    assert_eq!(out.code, 4);
    assert_eq!(out.error_code(), "SERVICE_NOT_FOUND");
    assert_eq!(
        out.json["context"]["availableHostnames"],
        serde_json::json!(["api", "db"])
    );
    assert!(!harness.platform.was_called("start_service").await);
}

#[tokio::test]
async fn test_stop_then_start() {
    let harness = Harness::logged_in(demo_platform()).await;

    let out = harness.run(&["stop", "--service", "api"]).await;
    assert_eq!(out.code, 0, "{}", out.json);
    assert_eq!(out.kind(), "async");
    assert_eq!(out.json["status"], "initiated");
    let process = &out.json["processes"][0];
    assert_eq!(process["actionName"], "serviceStackStop");
    assert_eq!(process["serviceHostname"], "api");
    assert_eq!(process["serviceId"], "svc-api");
    assert_eq!(process["status"], "FINISHED");

    let services = harness.platform.services().await;
    assert_eq!(services[0].status, "STOPPED");

    let out = harness.run(&["start", "--service", "api"]).await;
    assert_eq!(out.code, 0);
    assert_eq!(harness.platform.services().await[0].status, "ACTIVE");
}

#[tokio::test]
async fn test_restart() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness.run(&["restart", "--service", "db"]).await;
    assert_eq!(out.code, 0);
    assert_eq!(out.json["processes"][0]["actionName"], "serviceStackRestart");
}

#[tokio::test]
async fn test_service_flag_required() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness.run(&["start"]).await;
    assert_eq!(out.code, 3);
    assert_eq!(out.error_code(), "SERVICE_REQUIRED");
    assert!(harness.platform.calls().await.is_empty());
}

#[tokio::test]
async fn test_not_logged_in_makes_no_calls() {
    let harness = Harness::new(demo_platform());
    let out = harness.run(&["start", "--service", "api"]).await;
    assert_eq!(out.code, 2);
    assert!(harness.platform.calls().await.is_empty());
}

#[tokio::test]
async fn test_platform_error_passes_through() {
    let platform = demo_platform().with_error(
        "restart_service",
        CliError::new(ErrorCode::PermissionDenied, "forbidden"),
    );
    let harness = Harness::logged_in(platform).await;
    let out = harness.run(&["restart", "--service", "api"]).await;
    assert_eq!(out.code, 5);
    assert_eq!(out.error_code(), "PERMISSION_DENIED");
    assert_eq!(out.json["error"], "forbidden");
}

#[tokio::test]
async fn test_scale_min_above_max_makes_no_calls() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness
        .run(&["scale", "--service", "api", "--min-cpu", "4", "--max-cpu", "2"])
        .await;
    assert_eq!(out.code, 3);
    assert_eq!(out.error_code(), "INVALID_SCALING");
    assert!(harness.platform.calls().await.is_empty());
}

#[tokio::test]
async fn test_scale_without_params() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness.run(&["scale", "--service", "api"]).await;
    assert_eq!(out.error_code(), "INVALID_SCALING");
}

#[tokio::test]
async fn test_scale_applied_without_process_is_sync() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness
        .run(&[
            "scale",
            "--service",
            "api",
            "--cpu-mode",
            "DEDICATED",
            "--min-ram",
            "0.5",
            "--max-ram",
            "2",
            "--max-replicas",
            "3",
        ])
        .await;
    assert_eq!(out.code, 0, "{}", out.json);
    assert_eq!(out.kind(), "sync");
    assert_eq!(out.data()["message"], "Scaling parameters updated");
    assert_eq!(out.data()["serviceId"], "svc-api");

    let applied = harness.platform.autoscaling("svc-api").await.unwrap();
    assert_eq!(applied.cpu_mode.as_deref(), Some("DEDICATED"));
    assert_eq!(applied.min_ram, Some(0.5));
    assert_eq!(applied.horizontal_max_count, Some(3));
    assert_eq!(applied.min_cpu, None);
}
