//! Import models

use serde::{Deserialize, Serialize};

use crate::models::process::Process;

/// Result of importing services from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub project_id: String,
    pub project_name: String,
    #[serde(default)]
    pub service_stacks: Vec<ImportedService>,
}

/// Per-service outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedService {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub processes: Vec<Process>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ImportError>,
}

/// Platform error reported for a single imported service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportError {
    pub code: String,
    pub message: String,
}
