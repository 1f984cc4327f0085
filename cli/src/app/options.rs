//! Application configuration options

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::logs::{LogFormat, LogLevel, LogOptions};
use crate::storage::layout::StorageLayout;

pub const DATA_FILE_ENV: &str = "ZAIA_DATA_FILE_PATH";
pub const API_HOST_ENV: &str = "ZAIA_API_HOST";
pub const API_TIMEOUT_ENV: &str = "ZAIA_API_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "ZAIA_LOG_FORMAT";

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Where local state lives
    pub storage: StorageLayout,

    /// API host used by login when none is given
    pub default_api_host: String,

    /// Region recorded by login when none is given
    pub default_region: String,

    /// Deadline for a single platform call
    pub api_timeout: Duration,

    /// Logging configuration
    pub log: LogOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            storage: StorageLayout::default(),
            default_api_host: "api.app-prg1.zerops.io".to_string(),
            default_region: "prg1".to_string(),
            api_timeout: Duration::from_secs(30),
            log: LogOptions::default(),
        }
    }
}

impl AppOptions {
    /// Defaults overridden by `ZAIA_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppOptions::from_env`] over an arbitrary lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = StorageLayout::with_override(non_empty(DATA_FILE_ENV).map(PathBuf::from));
        let default_api_host = non_empty(API_HOST_ENV).unwrap_or(defaults.default_api_host);
        let api_timeout = non_empty(API_TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.api_timeout);
        let format = match non_empty(LOG_FORMAT_ENV).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            storage,
            default_api_host,
            default_region: defaults.default_region,
            api_timeout,
            log: LogOptions {
                format,
                ..defaults.log
            },
        }
    }

    /// Raise the log level for `--debug`
    pub fn with_debug(mut self, debug: bool) -> Self {
        if debug {
            self.log.log_level = LogLevel::Debug;
        }
        self
    }
}
