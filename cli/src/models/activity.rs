//! Project activity history

use serde::{Deserialize, Serialize};

use crate::models::process::ServiceStackRef;

/// User who triggered a process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub full_name: String,
    pub email: String,
}

/// A historical process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessEvent {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub service_stacks: Vec<ServiceStackRef>,
    pub action_name: String,
    pub status: String,
    pub created: String,
    #[serde(default)]
    pub started: Option<String>,
    #[serde(default)]
    pub finished: Option<String>,
    #[serde(default)]
    pub created_by_user: Option<Actor>,
    #[serde(default)]
    pub created_by_system: bool,
}

/// A historical application version (build and deploy)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppVersionEvent {
    pub id: String,
    pub project_id: String,
    pub service_stack_id: String,
    /// Where the version came from, e.g. GIT or CLI
    pub source: String,
    pub status: String,
    pub sequence: i64,
    #[serde(default)]
    pub build: Option<BuildInfo>,
    pub created: String,
    #[serde(default)]
    pub last_update: String,
}

/// Build pipeline timing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    #[serde(default)]
    pub pipeline_start: Option<String>,
    #[serde(default)]
    pub pipeline_finish: Option<String>,
    #[serde(default)]
    pub pipeline_failed: Option<String>,
}
