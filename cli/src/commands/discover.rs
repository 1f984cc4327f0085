//! discover

use serde::Serialize;

use crate::app::context::AppContext;
use crate::errors::CliError;
use crate::models::env::EnvVar;
use crate::models::project::Project;
use crate::models::service::{ServicePort, ServiceStack};
use crate::output::envelope::Envelope;
use crate::platform::port::PlatformPort;
use crate::services::resolver::resolve_service;

#[derive(Debug, Serialize)]
struct ProjectSummary {
    id: String,
    name: String,
    status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceSummary {
    hostname: String,
    service_id: String,
    #[serde(rename = "type")]
    type_version: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    containers: Option<Range<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resources: Option<Resources>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ports: Vec<ServicePort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    envs: Option<Vec<EnvValue>>,
}

#[derive(Debug, Serialize)]
struct Range<T> {
    min: Option<T>,
    max: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Resources {
    cpu_mode: Option<String>,
    cpu: Range<u32>,
    ram: Range<f64>,
    disk: Range<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EnvValue {
    pub key: String,
    pub value: String,
}

impl From<EnvVar> for EnvValue {
    fn from(var: EnvVar) -> Self {
        Self {
            key: var.key,
            value: var.content,
        }
    }
}

#[derive(Debug, Serialize)]
struct Discovery {
    project: ProjectSummary,
    services: Vec<ServiceSummary>,
}

/// Project and service summary, or one service in detail with `--service`
pub async fn discover(
    ctx: &AppContext,
    service: Option<&str>,
    include_envs: bool,
) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    let platform = session.platform.as_ref();

    let project = platform.get_project(session.project_id()).await?;
    let services = platform.list_services(session.project_id()).await?;

    let hostname = service.filter(|s| !s.is_empty());
    let selected: Vec<&ServiceStack> = match hostname {
        Some(hostname) => vec![resolve_service(hostname, &services)?],
        None => services.iter().collect(),
    };
    let detailed = hostname.is_some();

    let mut summaries = Vec::with_capacity(selected.len());
    for svc in selected {
        let mut entry = if detailed { detail(svc) } else { summary(svc) };
        if include_envs {
            entry.envs = Some(envs(platform, &svc.id).await?);
        }
        summaries.push(entry);
    }

    Ok(Envelope::sync(Discovery {
        project: project_summary(project),
        services: summaries,
    }))
}

fn project_summary(project: Project) -> ProjectSummary {
    ProjectSummary {
        id: project.id,
        name: project.name,
        status: project.status,
    }
}

fn summary(svc: &ServiceStack) -> ServiceSummary {
    ServiceSummary {
        hostname: svc.hostname.clone(),
        service_id: svc.id.clone(),
        type_version: svc.type_version.clone(),
        status: svc.status.clone(),
        created: None,
        containers: None,
        resources: None,
        ports: Vec::new(),
        envs: None,
    }
}

fn detail(svc: &ServiceStack) -> ServiceSummary {
    let mut out = summary(svc);
    out.created = Some(svc.created.clone()).filter(|c| !c.is_empty());
    out.ports = svc.ports.clone();
    if let Some(scaling) = &svc.autoscaling {
        out.containers = Some(Range {
            min: scaling.horizontal_min_count,
            max: scaling.horizontal_max_count,
        });
        out.resources = Some(Resources {
            cpu_mode: scaling.cpu_mode.clone(),
            cpu: Range {
                min: scaling.min_cpu,
                max: scaling.max_cpu,
            },
            ram: Range {
                min: scaling.min_ram,
                max: scaling.max_ram,
            },
            disk: Range {
                min: scaling.min_disk,
                max: scaling.max_disk,
            },
        });
    }
    out
}

async fn envs(platform: &dyn PlatformPort, service_id: &str) -> Result<Vec<EnvValue>, CliError> {
    let vars = platform.get_service_env(service_id).await?;
    Ok(vars.into_iter().map(EnvValue::from).collect())
}
