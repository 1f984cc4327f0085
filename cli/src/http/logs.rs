//! Log access and the log backend fetcher
//!
//! Reading logs takes two hops: the platform API hands out a short-lived access handle, and
//! the entries are then read from the log backend it points to.

use std::time::Duration;

use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::errors::CliError;
use crate::http::client::ApiClient;
use crate::models::logs::{newest_in_order, LogAccess, LogEntry, LogQuery};
use crate::platform::classify::{classify_status, classify_transport, Entity};
use crate::platform::port::LogFetcher;

impl ApiClient {
    /// Obtain an access handle for the project's log backend
    pub async fn fetch_log_access(&self, project_id: &str) -> Result<LogAccess, CliError> {
        let path = format!("/project/{}/log", project_id);
        self.get(&path, Entity::Project).await
    }
}

#[derive(Debug, Deserialize)]
struct LogResponse {
    #[serde(default)]
    items: Vec<LogItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogItem {
    #[serde(default)]
    id: String,
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    hostname: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    severity_label: String,
}

impl From<LogItem> for LogEntry {
    fn from(item: LogItem) -> Self {
        LogEntry {
            id: item.id,
            timestamp: item.timestamp,
            severity: item.severity_label,
            message: item.message,
            container: item.hostname,
        }
    }
}

/// Reads entries from the log backend over HTTP
pub struct HttpLogFetcher {
    client: Client,
}

impl HttpLogFetcher {
    pub fn new(timeout: Duration) -> Result<Self, CliError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CliError::api(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

/// Build the backend URL from an access handle and query
pub fn log_url(access: &LogAccess, query: &LogQuery) -> Result<Url, CliError> {
    let raw = access.url.trim();
    let raw = raw.strip_prefix("GET ").unwrap_or(raw).trim();
    if raw.is_empty() {
        return Err(CliError::api("Log access handle has no URL"));
    }
    let raw = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let mut url = Url::parse(&raw)
        .map_err(|e| CliError::api(format!("Invalid log backend URL '{raw}': {e}")))?;
    {
        let mut params = url.query_pairs_mut();
        params.append_pair("accessToken", &access.access_token);
        if !query.service_id.is_empty() {
            params.append_pair("serviceStackId", &query.service_id);
        }
        if !query.severity.is_empty() && query.severity != "all" {
            params.append_pair("severity", &query.severity);
        }
        params.append_pair(
            "since",
            &query.since.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        params.append_pair("tail", &query.limit.to_string());
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            params.append_pair("search", search);
        }
    }
    Ok(url)
}

#[async_trait]
impl LogFetcher for HttpLogFetcher {
    async fn fetch_logs(
        &self,
        access: &LogAccess,
        query: &LogQuery,
    ) -> Result<Vec<LogEntry>, CliError> {
        let url = log_url(access, query)?;
        debug!("GET {} (logs)", url.path());

        let response = self
            .client
            .get(url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", access.access_token),
            )
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("log backend failed: {} - {}", status, body);
            return Err(classify_status(status.as_u16(), Entity::Service, &body));
        }

        let body: LogResponse = response.json().await.map_err(|e| classify_transport(&e))?;
        let entries = body.items.into_iter().map(LogEntry::from).collect();
        Ok(newest_in_order(entries, query.limit))
    }
}
