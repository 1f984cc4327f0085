//! Process models

use serde::{Deserialize, Serialize};

/// Reference to a service touched by a process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStackRef {
    pub id: String,
    pub name: String,
}

/// One asynchronous platform operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    /// Process ID
    pub id: String,

    /// Platform action name, e.g. `serviceStackStart`
    pub action_name: String,

    /// Platform-native status (PENDING, RUNNING, DONE, FAILED, CANCELLED)
    pub status: String,

    /// Services this process operates on
    #[serde(default)]
    pub service_stacks: Vec<ServiceStackRef>,

    #[serde(default)]
    pub created: String,

    #[serde(default)]
    pub started: Option<String>,

    #[serde(default)]
    pub finished: Option<String>,

    /// Why the process failed, if it did
    #[serde(default, alias = "failReason")]
    pub failure_reason: Option<String>,
}
