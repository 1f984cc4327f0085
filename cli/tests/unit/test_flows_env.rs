//! env get, set and delete

use zaia::models::env::EnvVar;

use crate::harness::{demo_platform, Harness};

fn vars(out: &crate::harness::Output) -> Vec<(String, String)> {
    out.data()["vars"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| {
            (
                v["key"].as_str().unwrap().to_string(),
                v["value"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_service_env_round_trip() {
    let harness = Harness::logged_in(demo_platform()).await;

    let out = harness
        .run(&["env", "set", "--service", "api", "DB_HOST=localhost", "DB_PORT=5432"])
        .await;
    assert_eq!(out.code, 0, "{}", out.json);
    assert_eq!(out.kind(), "async");
    assert_eq!(out.json["processes"][0]["serviceHostname"], "api");

    let out = harness.run(&["env", "get", "--service", "api"]).await;
    assert_eq!(out.code, 0);
    assert_eq!(out.data()["scope"], "service");
    assert_eq!(out.data()["serviceHostname"], "api");
    assert_eq!(
        vars(&out),
        vec![
            ("DB_HOST".to_string(), "localhost".to_string()),
            ("DB_PORT".to_string(), "5432".to_string()),
        ]
    );

    let out = harness
        .run(&["env", "delete", "--service", "api", "DB_HOST"])
        .await;
    assert_eq!(out.code, 0);
    assert_eq!(out.kind(), "async");

    let out = harness.run(&["env", "get", "--service", "api"]).await;
    assert_eq!(
        vars(&out),
        vec![("DB_PORT".to_string(), "5432".to_string())]
    );
}

#[tokio::test]
async fn test_value_keeps_equals_signs() {
    let harness = Harness::logged_in(demo_platform()).await;
    harness
        .run(&["env", "set", "--service", "api", "URL=postgres://h/db?sslmode=off"])
        .await;

    let out = harness.run(&["env", "get", "--service", "api"]).await;
    assert_eq!(
        vars(&out),
        vec![("URL".to_string(), "postgres://h/db?sslmode=off".to_string())]
    );
}

#[tokio::test]
async fn test_malformed_pair_makes_no_calls() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness
        .run(&["env", "set", "--service", "api", "GOOD=1", "BAD"])
        .await;
    assert_eq!(out.code, 3);
    assert_eq!(out.error_code(), "INVALID_ENV_FORMAT");
    assert!(harness.platform.calls().await.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_key_deletes_nothing() {
    let platform = demo_platform().with_service_env(
        "svc-api",
        vec![EnvVar {
            id: "env-a".to_string(),
            key: "A".to_string(),
            content: "1".to_string(),
        }],
    );
    let harness = Harness::logged_in(platform).await;

    let out = harness
        .run(&["env", "delete", "--service", "api", "A", "MISSING"])
        .await;
    assert_eq!(out.code, 1);
    assert_eq!(out.error_code(), "API_ERROR");
    assert_eq!(out.json["suggestion"], "Available vars: A");
    assert!(!harness.platform.was_called("delete_user_data").await);

    let out = harness.run(&["env", "get", "--service", "api"]).await;
    assert_eq!(vars(&out).len(), 1);
}

#[tokio::test]
async fn test_project_env() {
    let harness = Harness::logged_in(demo_platform()).await;

    let out = harness
        .run(&["env", "set", "--project", "REGION=eu", "TIER=gold"])
        .await;
    assert_eq!(out.code, 0);
    assert_eq!(out.json["processes"].as_array().unwrap().len(), 2);

    let out = harness.run(&["env", "get", "--project"]).await;
    assert_eq!(out.data()["scope"], "project");
    assert_eq!(vars(&out).len(), 2);

    let out = harness.run(&["env", "delete", "--project", "REGION"]).await;
    assert_eq!(out.code, 0);

    let out = harness.run(&["env", "get", "--project"]).await;
    assert_eq!(vars(&out), vec![("TIER".to_string(), "gold".to_string())]);
}

#[tokio::test]
async fn test_scope_required() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness.run(&["env", "get"]).await;
    assert_eq!(out.code, 3);
    assert_eq!(out.error_code(), "SERVICE_REQUIRED");
}

#[tokio::test]
async fn test_env_without_subcommand() {
    let harness = Harness::logged_in(demo_platform()).await;
    let out = harness.run(&["env"]).await;
    assert_eq!(out.code, 3);
    assert_eq!(out.error_code(), "INVALID_USAGE");
}

#[tokio::test]
async fn test_multiline_value_rejected() {
    let harness = Harness::logged_in(demo_platform()).await;

    let out = harness
        .run(&["env", "set", "--service", "api", "GREETING=hello\nADMIN=true"])
        .await;
    assert_eq!(out.code, 3);
    assert_eq!(out.error_code(), "INVALID_ENV_FORMAT");
    assert!(!harness.platform.was_called("set_service_env_file").await);

    let out = harness.run(&["env", "get", "--service", "api"]).await;
    assert!(vars(&out).is_empty());
}
