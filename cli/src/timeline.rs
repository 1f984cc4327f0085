//! Project activity timeline
//!
//! Process history and application version history are fetched concurrently together with the
//! service list, merged into one event list, then filtered, sorted newest first and truncated.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::CliError;
use crate::models::activity::{AppVersionEvent, ProcessEvent};
use crate::models::service::ServiceStack;
use crate::platform::port::PlatformPort;
use crate::process::lifecycle::map_status;

/// Platform action names and their public verbs
const ACTION_VERBS: &[(&str, &str)] = &[
    ("serviceStackStart", "start"),
    ("serviceStackStop", "stop"),
    ("serviceStackRestart", "restart"),
    ("serviceStackAutoscaling", "scale"),
    ("serviceStackImport", "import"),
    ("serviceStackDelete", "delete"),
    ("serviceStackUserDataFile", "env-update"),
    ("serviceStackEnableSubdomainAccess", "subdomain-enable"),
    ("serviceStackDisableSubdomainAccess", "subdomain-disable"),
];

/// One entry of the timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub timestamp: String,
    /// `process`, `build`, or `deploy`
    #[serde(rename = "type")]
    pub kind: String,
    pub action: String,
    pub status: String,
    /// Service hostname
    #[serde(rename = "service")]
    pub service_hostname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
    #[serde(rename = "duration", skip_serializing_if = "String::is_empty")]
    pub duration: String,
    /// Actor e-mail, or `system`
    #[serde(rename = "user", skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_id: Option<String>,
}

/// Timeline plus the raw counts it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
    pub process_count: usize,
    pub deploy_count: usize,
}

struct ServiceInfo {
    hostname: String,
    type_version: String,
}

/// Fetch the three sources concurrently and build the timeline.
///
/// Any failed fetch fails the whole call.
pub async fn build(
    platform: &dyn PlatformPort,
    project_id: &str,
    service_filter: Option<&str>,
    limit: usize,
) -> Result<Timeline, CliError> {
    let (processes, app_versions, services) = futures::try_join!(
        platform.search_processes(project_id, limit),
        platform.search_app_versions(project_id, limit),
        platform.list_services(project_id),
    )?;

    Ok(Timeline {
        process_count: processes.len(),
        deploy_count: app_versions.len(),
        events: merge(&processes, &app_versions, &services, service_filter, limit),
    })
}

/// Merge, filter by exact hostname, sort newest first and truncate to `limit`
pub fn merge(
    processes: &[ProcessEvent],
    app_versions: &[AppVersionEvent],
    services: &[ServiceStack],
    service_filter: Option<&str>,
    limit: usize,
) -> Vec<TimelineEvent> {
    let lookup: HashMap<&str, ServiceInfo> = services
        .iter()
        .map(|s| {
            (
                s.id.as_str(),
                ServiceInfo {
                    hostname: s.hostname.clone(),
                    type_version: s.type_version.clone(),
                },
            )
        })
        .collect();

    let mut events: Vec<TimelineEvent> = processes
        .iter()
        .map(|p| process_event(p, &lookup))
        .chain(app_versions.iter().map(|v| app_version_event(v, &lookup)))
        .collect();

    if let Some(hostname) = service_filter {
        events.retain(|e| e.service_hostname == hostname);
    }

    // unparsable timestamps sort last
    events.sort_by_cached_key(|e| std::cmp::Reverse((parse_time(&e.timestamp), e.timestamp.clone())));
    events.truncate(limit);
    events
}

/// Public verb for a platform action; unknown actions pass through
pub fn action_verb(action_name: &str) -> &str {
    ACTION_VERBS
        .iter()
        .find(|(native, _)| *native == action_name)
        .map(|(_, verb)| *verb)
        .unwrap_or(action_name)
}

fn process_event(p: &ProcessEvent, lookup: &HashMap<&str, ServiceInfo>) -> TimelineEvent {
    let (hostname, service_type) = match p.service_stacks.first() {
        Some(r) => match lookup.get(r.id.as_str()) {
            Some(info) => (info.hostname.clone(), info.type_version.clone()),
            None => (r.name.clone(), String::new()),
        },
        None => (String::new(), String::new()),
    };

    let action = action_verb(&p.action_name).to_string();
    let actor = p
        .created_by_user
        .as_ref()
        .map(|u| u.email.clone())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "system".to_string());

    TimelineEvent {
        timestamp: p.created.clone(),
        kind: "process".to_string(),
        detail: process_detail(&action, &hostname),
        action,
        status: map_status(&p.status),
        service_hostname: hostname,
        service_type,
        duration: duration_between(p.started.as_deref(), p.finished.as_deref()),
        actor: Some(actor),
        process_id: Some(p.id.clone()),
    }
}

fn app_version_event(v: &AppVersionEvent, lookup: &HashMap<&str, ServiceInfo>) -> TimelineEvent {
    let (hostname, service_type) = lookup
        .get(v.service_stack_id.as_str())
        .map(|info| (info.hostname.clone(), info.type_version.clone()))
        .unwrap_or_default();

    let is_build = v
        .build
        .as_ref()
        .is_some_and(|b| b.pipeline_start.is_some());
    let (kind, detail) = if is_build {
        ("build", format!("Build v{} from {}", v.sequence, v.source))
    } else {
        ("deploy", format!("Deploy v{} from {}", v.sequence, v.source))
    };
    let duration = v
        .build
        .as_ref()
        .map(|b| duration_between(b.pipeline_start.as_deref(), b.pipeline_finish.as_deref()))
        .unwrap_or_default();

    TimelineEvent {
        timestamp: v.created.clone(),
        kind: kind.to_string(),
        action: kind.to_string(),
        status: v.status.clone(),
        service_hostname: hostname,
        service_type,
        detail,
        duration,
        actor: None,
        process_id: None,
    }
}

fn process_detail(action: &str, hostname: &str) -> String {
    let mut chars = action.chars();
    let title = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    if hostname.is_empty() {
        title
    } else {
        format!("{title} {hostname}")
    }
}

fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Human duration between two RFC 3339 timestamps.
///
/// Empty when either end is missing or unparsable, or when `finish` precedes `start`.
pub fn duration_between(start: Option<&str>, finish: Option<&str>) -> String {
    let (Some(start), Some(finish)) = (start.and_then(parse_time), finish.and_then(parse_time))
    else {
        return String::new();
    };
    let secs = (finish - start).num_seconds();
    if secs < 0 {
        return String::new();
    }
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    }
}
