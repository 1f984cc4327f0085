//! logs

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::app::context::AppContext;
use crate::cli::LogsArgs;
use crate::commands::{find_service, require_service};
use crate::errors::CliError;
use crate::models::logs::{LogEntry, LogQuery};
use crate::output::envelope::Envelope;

pub const SEVERITIES: &[&str] = &["all", "error", "warning", "info", "debug"];

#[derive(Debug, Serialize)]
struct EntryOutput {
    timestamp: String,
    severity: String,
    message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    container: String,
}

impl From<LogEntry> for EntryOutput {
    fn from(entry: LogEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            severity: entry.severity,
            message: entry.message,
            container: entry.container,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogsOutput {
    entries: Vec<EntryOutput>,
    has_more: bool,
}

/// Obtain log access for the project, then fetch from the log backend
pub async fn logs(ctx: &AppContext, args: &LogsArgs) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    let hostname = require_service(args.service.as_deref())?;
    let since = parse_since(&args.since, Utc::now())?;
    let severity = parse_severity(&args.severity)?;
    if args.limit == 0 {
        return Err(CliError::invalid_parameter("--limit must be at least 1"));
    }

    let service = find_service(&session, hostname).await?;
    let access = session
        .platform
        .get_project_log(session.project_id())
        .await?;

    let query = LogQuery {
        service_id: service.id,
        severity,
        since,
        limit: args.limit,
        search: args.search.clone().filter(|s| !s.is_empty()),
    };
    let entries = ctx.log_fetcher.fetch_logs(&access, &query).await?;

    let has_more = entries.len() >= query.limit;
    Ok(Envelope::sync(LogsOutput {
        entries: entries.into_iter().map(EntryOutput::from).collect(),
        has_more,
    }))
}

/// Parse `Nm` (1-1440), `Nh` (1-168), `Nd` (1-30) relative to `now`, or an RFC 3339 instant
pub fn parse_since(value: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, CliError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(now - Duration::hours(1));
    }

    let invalid = || {
        CliError::invalid_parameter(format!("Invalid --since format: {value}"))
            .with_suggestion("Use: 30m, 1h, 24h, 7d, or an RFC 3339 timestamp")
    };

    let split = value.len() - value.chars().last().map_or(0, char::len_utf8);
    let (number, unit) = value.split_at(split);
    if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) {
        let n: i64 = number.parse().map_err(|_| invalid())?;
        let window = match unit {
            "m" if (1..=1440).contains(&n) => Some(Duration::minutes(n)),
            "h" if (1..=168).contains(&n) => Some(Duration::hours(n)),
            "d" if (1..=30).contains(&n) => Some(Duration::days(n)),
            _ => None,
        };
        if let Some(window) = window {
            return Ok(now - window);
        }
        if matches!(unit, "m" | "h" | "d") {
            return Err(invalid());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| invalid())
}

pub fn parse_severity(value: &str) -> Result<String, CliError> {
    let value = value.trim().to_lowercase();
    if SEVERITIES.contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(
            CliError::invalid_parameter(format!("Invalid --severity: {value}"))
                .with_suggestion(format!("Use one of: {}", SEVERITIES.join(", "))),
        )
    }
}
