//! Runtime log models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short-lived access to the project log backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogAccess {
    pub access_token: String,
    #[serde(default)]
    pub expiration: String,
    /// Log backend URL, possibly prefixed with the HTTP method (`GET https://...`)
    pub url: String,
    #[serde(default)]
    pub url_plain: String,
}

/// Filters applied when fetching log entries
#[derive(Debug, Clone, PartialEq)]
pub struct LogQuery {
    pub service_id: String,
    /// `all`, `error`, `warning`, `info`, or `debug`
    pub severity: String,
    pub since: DateTime<Utc>,
    pub limit: usize,
    pub search: Option<String>,
}

/// A single log line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub timestamp: String,
    pub severity: String,
    pub message: String,
    pub container: String,
}

/// Order entries chronologically and keep the newest `limit`
pub fn newest_in_order(mut entries: Vec<LogEntry>, limit: usize) -> Vec<LogEntry> {
    entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    let skip = entries.len().saturating_sub(limit);
    entries.split_off(skip)
}
