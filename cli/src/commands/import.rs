//! import

use serde::Serialize;
use serde_json::json;
use serde_yaml::{Mapping, Value};
use tracing::warn;

use crate::app::context::AppContext;
use crate::cli::ImportArgs;
use crate::errors::{CliError, ErrorCode};
use crate::models::import::ImportResult;
use crate::output::envelope::{Envelope, ProcessOutput};

/// One service a dry run would create
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedService {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

pub async fn import(ctx: &AppContext, args: &ImportArgs) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    let content = read_content(args).await?;
    let planned = validate(&content, session.project_id())?;

    if args.dry_run {
        return Ok(Envelope::sync(json!({
            "dryRun": true,
            "valid": true,
            "services": planned,
            "warnings": Vec::<String>::new(),
        })));
    }

    let result = session
        .platform
        .import_services(session.project_id(), &content)
        .await?;
    collect(result)
}

async fn read_content(args: &ImportArgs) -> Result<String, CliError> {
    match (&args.content, &args.file) {
        (Some(content), _) if !content.trim().is_empty() => Ok(content.clone()),
        (_, Some(path)) => tokio::fs::read_to_string(path).await.map_err(|e| {
            CliError::new(
                ErrorCode::FileNotFound,
                format!("Cannot read file: {}", path.display()),
            )
            .with_context(json!({ "path": path.display().to_string(), "reason": e.to_string() }))
        }),
        _ => Err(
            CliError::invalid_parameter("--file or --content is required").with_suggestion(
                "Run: zaia import --file services.yml or zaia import --content '<yaml>'",
            ),
        ),
    }
}

/// Check the document shape and list the services it would create
pub fn validate(content: &str, project_id: &str) -> Result<Vec<PlannedService>, CliError> {
    let document: Value = serde_yaml::from_str(content).map_err(|e| {
        CliError::new(ErrorCode::InvalidImportYml, format!("Invalid YAML syntax: {e}"))
    })?;
    let root = document.as_mapping().ok_or_else(|| {
        CliError::new(ErrorCode::InvalidImportYml, "Import document must be a mapping")
            .with_suggestion("import.yml must contain a 'services:' array")
    })?;

    if root.contains_key("project") {
        return Err(CliError::new(
            ErrorCode::ImportHasProject,
            "import.yml must not contain 'project:' section in project-scoped context",
        )
        .with_suggestion("Remove the 'project:' section; services are imported into the current project")
        .with_context(json!({ "projectId": project_id })));
    }

    let services = match root.get("services") {
        Some(Value::Sequence(services)) => services,
        Some(_) => {
            return Err(CliError::new(
                ErrorCode::InvalidImportYml,
                "'services' must be an array",
            )
            .with_suggestion("Format: services:\n  - hostname: api\n    type: nodejs@22"))
        }
        None => {
            return Err(
                CliError::new(ErrorCode::InvalidImportYml, "Missing 'services' section")
                    .with_suggestion("import.yml must contain a 'services:' array"),
            )
        }
    };

    Ok(services
        .iter()
        .filter_map(Value::as_mapping)
        .map(|service| PlannedService {
            action: "create",
            hostname: string_field(service, "hostname").or_else(|| string_field(service, "name")),
            service_type: string_field(service, "type"),
        })
        .collect())
}

fn string_field(map: &Mapping, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Flatten per-service processes; fail only when nothing started and something errored
pub fn collect(result: ImportResult) -> Result<Envelope, CliError> {
    let mut processes = Vec::new();
    let mut errors = Vec::new();

    for service in &result.service_stacks {
        if let Some(err) = &service.error {
            warn!(
                "import of service {} failed: {} ({})",
                service.name, err.message, err.code
            );
            errors.push(json!({
                "service": service.name,
                "code": err.code,
                "message": err.message,
            }));
        }
        for process in &service.processes {
            let mut out = ProcessOutput::from_process(process, Some(&service.name));
            out.action_name = "import".to_string();
            if !service.id.is_empty() {
                out.service_id = Some(service.id.clone());
            }
            processes.push(out);
        }
    }

    if processes.is_empty() && !errors.is_empty() {
        return Err(CliError::api(format!(
            "Import failed for {} service(s)",
            errors.len()
        ))
        .with_context(json!({ "errors": errors })));
    }

    Ok(Envelope::initiated(processes, "Import accepted, no processes to track"))
}
