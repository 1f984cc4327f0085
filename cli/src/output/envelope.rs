//! The response envelope
//!
//! Every invocation writes exactly one envelope to its sink. The async variant can only be
//! built from a non-empty process list.

use std::io::Write;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::{CliError, EXIT_OK};
use crate::models::process::Process;
use crate::process::lifecycle::map_status;

/// Public projection of a platform process
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutput {
    pub process_id: String,
    pub action_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl ProcessOutput {
    /// Project a process, preferring the caller's hostname over the process' own service ref
    pub fn from_process(process: &Process, hostname: Option<&str>) -> Self {
        let first_ref = process.service_stacks.first();
        let service_hostname = hostname
            .map(str::to_string)
            .or_else(|| first_ref.map(|r| r.name.clone()))
            .filter(|h| !h.is_empty());
        let service_id = first_ref.map(|r| r.id.clone()).filter(|id| !id.is_empty());

        Self {
            process_id: process.id.clone(),
            action_name: process.action_name.clone(),
            service_hostname,
            service_id,
            status: map_status(&process.status),
            created: Some(process.created.clone()).filter(|c| !c.is_empty()),
            finished: process.finished.clone(),
            failure_reason: process.failure_reason.clone(),
        }
    }

    fn is_trackable(&self) -> bool {
        !self.process_id.is_empty() && !self.action_name.is_empty() && !self.status.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Body {
    Sync {
        status: &'static str,
        data: Value,
    },
    Async {
        status: &'static str,
        processes: Vec<ProcessOutput>,
    },
    Error {
        code: String,
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        context: Option<Value>,
    },
}

/// Envelope kind, for callers that branch on the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Sync,
    Async,
    Error,
}

/// One complete invocation result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Envelope {
    body: Body,
    #[serde(skip)]
    exit_code: i32,
}

impl Envelope {
    /// Immediate success carrying arbitrary data
    ///
    /// Data that fails to serialize turns into an `API_ERROR` envelope.
    pub fn sync(data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self {
                body: Body::Sync { status: "ok", data },
                exit_code: EXIT_OK,
            },
            Err(e) => Self::error(&CliError::api(format!("failed to encode response: {e}"))),
        }
    }

    /// Immediate success carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self::sync(json!({ "message": message.into() }))
    }

    /// Initiated processes, or a sync message when there are none to track.
    ///
    /// Processes missing an id, action name or status are not trackable and are dropped.
    pub fn initiated(processes: Vec<ProcessOutput>, empty_message: &str) -> Self {
        let (processes, untrackable): (Vec<_>, Vec<_>) =
            processes.into_iter().partition(ProcessOutput::is_trackable);
        if !untrackable.is_empty() {
            warn!("dropping {} process(es) without id, action or status", untrackable.len());
        }
        if processes.is_empty() {
            return Self::message(empty_message);
        }
        Self {
            body: Body::Async {
                status: "initiated",
                processes,
            },
            exit_code: EXIT_OK,
        }
    }

    /// Failure, carrying the taxonomy code and its exit code
    pub fn error(err: &CliError) -> Self {
        Self {
            body: Body::Error {
                code: err.code.as_str().to_string(),
                error: err.message.clone(),
                suggestion: err.suggestion.clone(),
                context: err.context.clone(),
            },
            exit_code: err.exit_code(),
        }
    }

    pub fn kind(&self) -> EnvelopeKind {
        match self.body {
            Body::Sync { .. } => EnvelopeKind::Sync,
            Body::Async { .. } => EnvelopeKind::Async,
            Body::Error { .. } => EnvelopeKind::Error,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Serialize as a single JSON line
    pub fn to_json(&self) -> String {
        // Body holds only strings and JSON values, serialization cannot fail
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"type":"error","code":"API_ERROR","error":"failed to encode response: {}"}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }

    /// Write the envelope to the sink. This is the only write an invocation performs.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> std::io::Result<()> {
        let mut line = self.to_json();
        line.push('\n');
        sink.write_all(line.as_bytes())?;
        sink.flush()
    }
}
