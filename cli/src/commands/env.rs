//! env get, set and delete

use serde_json::json;

use crate::app::context::{AppContext, Session};
use crate::cli::EnvScope;
use crate::commands::discover::EnvValue;
use crate::commands::find_service;
use crate::errors::{CliError, ErrorCode};
use crate::models::env::EnvVar;
use crate::models::process::Process;
use crate::output::envelope::{Envelope, ProcessOutput};

/// A parsed `KEY=value` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvPair {
    pub key: String,
    pub value: String,
}

enum Target<'a> {
    Project,
    Service(&'a str),
}

impl<'a> Target<'a> {
    fn from_scope(scope: &'a EnvScope) -> Result<Self, CliError> {
        if scope.project {
            return Ok(Target::Project);
        }
        match scope.service.as_deref().map(str::trim) {
            Some(hostname) if !hostname.is_empty() => Ok(Target::Service(hostname)),
            _ => Err(CliError::new(
                ErrorCode::ServiceRequired,
                "--service or --project flag is required",
            )
            .with_suggestion("Use --service <hostname> or --project")),
        }
    }
}

pub async fn get(ctx: &AppContext, scope: &EnvScope) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    let target = Target::from_scope(scope)?;

    let data = match target {
        Target::Project => {
            let vars = session.platform.get_project_env(session.project_id()).await?;
            json!({ "scope": "project", "vars": values(vars) })
        }
        Target::Service(hostname) => {
            let service = find_service(&session, hostname).await?;
            let vars = session.platform.get_service_env(&service.id).await?;
            json!({
                "scope": "service",
                "serviceHostname": hostname,
                "vars": values(vars),
            })
        }
    };
    Ok(Envelope::sync(data))
}

pub async fn set(
    ctx: &AppContext,
    scope: &EnvScope,
    pairs: &[String],
    sensitive: bool,
) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    let target = Target::from_scope(scope)?;
    let pairs = parse_pairs(pairs)?;

    match target {
        Target::Project => {
            let mut processes = Vec::with_capacity(pairs.len());
            for pair in &pairs {
                let process = session
                    .platform
                    .create_project_env(session.project_id(), &pair.key, &pair.value, sensitive)
                    .await?;
                processes.push(ProcessOutput::from_process(&process, None));
            }
            Ok(Envelope::initiated(processes, "No variables to set"))
        }
        Target::Service(hostname) => {
            let service = find_service(&session, hostname).await?;
            let process = session
                .platform
                .set_service_env_file(&service.id, &env_file(&pairs))
                .await?;
            Ok(single(&process, hostname))
        }
    }
}

/// Delete variables by key. Every key is resolved before the first delete is issued.
pub async fn delete(
    ctx: &AppContext,
    scope: &EnvScope,
    keys: &[String],
) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    let target = Target::from_scope(scope)?;

    match target {
        Target::Project => {
            let vars = session.platform.get_project_env(session.project_id()).await?;
            let ids = resolve_keys(&vars, keys, "Project")?;
            let mut processes = Vec::with_capacity(ids.len());
            for id in ids {
                let process = session.platform.delete_project_env(id).await?;
                processes.push(ProcessOutput::from_process(&process, None));
            }
            Ok(Envelope::initiated(processes, "No variables to delete"))
        }
        Target::Service(hostname) => {
            let processes = delete_service_vars(&session, hostname, keys).await?;
            Ok(Envelope::initiated(
                processes
                    .iter()
                    .map(|p| ProcessOutput::from_process(p, Some(hostname)))
                    .collect(),
                "No variables to delete",
            ))
        }
    }
}

async fn delete_service_vars(
    session: &Session,
    hostname: &str,
    keys: &[String],
) -> Result<Vec<Process>, CliError> {
    let service = find_service(session, hostname).await?;
    let vars = session.platform.get_service_env(&service.id).await?;
    let ids = resolve_keys(&vars, keys, "Service")?;

    let mut processes = Vec::with_capacity(ids.len());
    for id in ids {
        processes.push(session.platform.delete_user_data(id).await?);
    }
    Ok(processes)
}

/// Split each argument on its first `=`
pub fn parse_pairs(args: &[String]) -> Result<Vec<EnvPair>, CliError> {
    args.iter()
        .map(|arg| {
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                CliError::new(
                    ErrorCode::InvalidEnvFormat,
                    format!("Invalid format '{arg}', expected KEY=value"),
                )
                .with_suggestion("Format: KEY=value (split on first '=')")
            })?;
            if key.is_empty() {
                return Err(
                    CliError::new(ErrorCode::InvalidEnvFormat, "Empty key in env var")
                        .with_suggestion("Format: KEY=value"),
                );
            }
            if arg.contains(['\n', '\r']) {
                return Err(CliError::new(
                    ErrorCode::InvalidEnvFormat,
                    format!("Env var '{key}' contains a line break"),
                )
                .with_suggestion("Values must fit on a single line"));
            }
            Ok(EnvPair {
                key: key.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}

/// Render pairs as a `.env` body
pub fn env_file(pairs: &[EnvPair]) -> String {
    pairs
        .iter()
        .map(|p| format!("{}={}\n", p.key, p.value))
        .collect()
}

fn resolve_keys<'v>(
    vars: &'v [EnvVar],
    keys: &[String],
    scope: &str,
) -> Result<Vec<&'v str>, CliError> {
    keys.iter()
        .map(|key| {
            vars.iter()
                .find(|v| &v.key == key)
                .map(|v| v.id.as_str())
                .ok_or_else(|| {
                    let available: Vec<&str> = vars.iter().map(|v| v.key.as_str()).collect();
                    let listed = if available.is_empty() {
                        "(none)".to_string()
                    } else {
                        available.join(", ")
                    };
                    CliError::api(format!("{scope} env var '{key}' not found"))
                        .with_suggestion(format!("Available vars: {listed}"))
                        .with_context(json!({ "key": key, "availableKeys": available }))
                })
        })
        .collect()
}

fn values(vars: Vec<EnvVar>) -> Vec<EnvValue> {
    vars.into_iter().map(EnvValue::from).collect()
}

fn single(process: &Process, hostname: &str) -> Envelope {
    Envelope::initiated(
        vec![ProcessOutput::from_process(process, Some(hostname))],
        "Variables updated",
    )
}
