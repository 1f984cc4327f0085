//! Service stack models

use serde::{Deserialize, Serialize};

/// A service instance within a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStack {
    /// Platform identifier
    pub id: String,

    /// Human-chosen name, unique within the project
    pub hostname: String,

    /// Owning project ID
    pub project_id: String,

    /// Type and version, e.g. `nodejs@22`
    pub type_version: String,

    /// ACTIVE, STOPPED, or another platform-defined status
    pub status: String,

    /// HA or NON_HA
    pub mode: String,

    /// Exposed ports
    #[serde(default)]
    pub ports: Vec<ServicePort>,

    /// Current autoscaling configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscaling: Option<Autoscaling>,

    /// Creation timestamp
    pub created: String,

    /// Last update timestamp
    pub last_update: String,
}

/// A port exposed by a service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    pub port: u16,
    pub protocol: String,
    #[serde(default)]
    pub public: bool,
}

/// Autoscaling limits as reported by the platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Autoscaling {
    pub horizontal_min_count: Option<u32>,
    pub horizontal_max_count: Option<u32>,
    pub cpu_mode: Option<String>,
    pub start_cpu_core_count: Option<u32>,
    pub min_cpu: Option<u32>,
    pub max_cpu: Option<u32>,
    pub min_ram: Option<f64>,
    pub max_ram: Option<f64>,
    pub min_disk: Option<f64>,
    pub max_disk: Option<f64>,
}

/// Requested autoscaling changes; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoscalingParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_min_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_max_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cpu_core_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cpu: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cpu: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_ram: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ram: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_disk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_disk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap_enabled: Option<bool>,
}

impl AutoscalingParams {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == AutoscalingParams::default()
    }
}
