//! Shared fixtures

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use zaia::app::context::AppContext;
use zaia::app::options::AppOptions;
use zaia::app::run::run_with;
use zaia::models::logs::LogEntry;
use zaia::models::project::{Project, UserInfo};
use zaia::models::service::ServiceStack;
use zaia::platform::memory::{MemoryConnector, MemoryLogFetcher, MemoryPlatform};
use zaia::storage::credentials::{ProjectRef, RegionData, StoredCredentials, UserRef};
use zaia::storage::layout::StorageLayout;

pub const PROJECT_ID: &str = "proj-1";

/// One invocation's result
pub struct Output {
    pub code: i32,
    pub json: Value,
}

impl Output {
    pub fn kind(&self) -> &str {
        self.json["type"].as_str().unwrap_or_default()
    }

    pub fn error_code(&self) -> &str {
        self.json["code"].as_str().unwrap_or_default()
    }

    pub fn data(&self) -> &Value {
        &self.json["data"]
    }
}

pub struct Harness {
    pub platform: Arc<MemoryPlatform>,
    pub logs: Arc<MemoryLogFetcher>,
    pub ctx: AppContext,
    _dir: TempDir,
}

impl Harness {
    pub fn new(platform: MemoryPlatform) -> Self {
        Self::with_logs(platform, Vec::new())
    }

    pub fn with_logs(platform: MemoryPlatform, entries: Vec<LogEntry>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let options = AppOptions {
            storage: StorageLayout::new(dir.path().join("zaia.data")),
            ..Default::default()
        };
        let platform = Arc::new(platform);
        let logs = Arc::new(MemoryLogFetcher::new(entries));
        let ctx = AppContext::new(
            options,
            Arc::new(MemoryConnector::new(platform.clone())),
            logs.clone(),
        );
        Self {
            platform,
            logs,
            ctx,
            _dir: dir,
        }
    }

    /// Harness with credentials for [`PROJECT_ID`] already stored
    pub async fn logged_in(platform: MemoryPlatform) -> Self {
        let harness = Self::new(platform);
        harness.store_credentials().await;
        harness
    }

    pub async fn store_credentials(&self) {
        let record = StoredCredentials {
            token: "tok".to_string(),
            api_host: "api.example.test".to_string(),
            region_data: RegionData {
                name: "prg1".to_string(),
                is_default: true,
                address: "api.example.test".to_string(),
                gui_address: None,
            },
            project: ProjectRef {
                id: PROJECT_ID.to_string(),
                name: "demo".to_string(),
            },
            user: UserRef {
                name: "Ada".to_string(),
                email: "ada@example.test".to_string(),
            },
        };
        self.ctx.store.save(&record).await.unwrap();
    }

    pub fn data_file(&self) -> PathBuf {
        self.ctx.options.storage.data_file.clone()
    }

    /// Run `zaia <args>`; asserts that exactly one JSON line was written
    pub async fn run(&self, args: &[&str]) -> Output {
        let argv: Vec<String> = std::iter::once("zaia")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect();
        let mut sink: Vec<u8> = Vec::new();
        let code = run_with(argv, &self.ctx, &mut sink).await;

        let text = String::from_utf8(sink).unwrap();
        assert_eq!(text.lines().count(), 1, "expected one line, got: {text}");
        let json: Value = serde_json::from_str(text.trim_end()).unwrap();
        Output { code, json }
    }
}

pub fn user() -> UserInfo {
    UserInfo {
        id: "client-1".to_string(),
        full_name: "Ada".to_string(),
        email: "ada@example.test".to_string(),
    }
}

pub fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        status: "ACTIVE".to_string(),
    }
}

pub fn service(id: &str, hostname: &str) -> ServiceStack {
    ServiceStack {
        id: id.to_string(),
        hostname: hostname.to_string(),
        project_id: PROJECT_ID.to_string(),
        type_version: "nodejs@22".to_string(),
        status: "ACTIVE".to_string(),
        mode: "NON_HA".to_string(),
        ..Default::default()
    }
}

/// A project with `api` and `db` services
pub fn demo_platform() -> MemoryPlatform {
    MemoryPlatform::new()
        .with_user_info(user())
        .with_projects(vec![project(PROJECT_ID, "demo")])
        .with_services(vec![service("svc-api", "api"), service("svc-db", "db")])
}
