//! Build metadata

use serde::{Deserialize, Serialize};

/// Version information reported by `zaia version`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub commit: String,
    pub built: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        commit: option_env!("GIT_HASH").unwrap_or("unknown").to_string(),
        built: option_env!("BUILD_TIME").unwrap_or("unknown").to_string(),
    }
}
