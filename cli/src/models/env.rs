//! Environment variable models

use serde::{Deserialize, Serialize};

/// An environment variable scoped to a project or a service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    pub id: String,
    pub key: String,
    pub content: String,
}
