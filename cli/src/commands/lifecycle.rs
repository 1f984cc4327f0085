//! start, stop, restart and scale

use serde_json::json;

use crate::app::context::AppContext;
use crate::cli::{ScaleArgs, ServiceArgs};
use crate::commands::{find_service, require_service};
use crate::errors::{CliError, ErrorCode};
use crate::models::service::AutoscalingParams;
use crate::output::envelope::{Envelope, ProcessOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Restart,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Restart => "restart",
        }
    }
}

pub async fn run_action(
    ctx: &AppContext,
    action: Action,
    args: &ServiceArgs,
) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    let hostname = require_service(args.service.as_deref())?;

    let service = find_service(&session, hostname).await?;
    let platform = session.platform.as_ref();
    let process = match action {
        Action::Start => platform.start_service(&service.id).await?,
        Action::Stop => platform.stop_service(&service.id).await?,
        Action::Restart => platform.restart_service(&service.id).await?,
    };

    Ok(Envelope::initiated(
        vec![ProcessOutput::from_process(&process, Some(hostname))],
        &format!("Service {hostname}: {} accepted", action.as_str()),
    ))
}

/// Change autoscaling limits. Bounds are validated before any platform call.
pub async fn scale(ctx: &AppContext, args: &ScaleArgs) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    let hostname = require_service(args.service.as_deref())?;
    let params = scaling_params(args)?;

    let service = find_service(&session, hostname).await?;
    let process = session
        .platform
        .set_autoscaling(&service.id, &params)
        .await?;

    match process {
        Some(process) => Ok(Envelope::initiated(
            vec![ProcessOutput::from_process(&process, Some(hostname))],
            "Scaling parameters updated",
        )),
        None => Ok(Envelope::sync(json!({
            "message": "Scaling parameters updated",
            "serviceHostname": hostname,
            "serviceId": service.id,
        }))),
    }
}

/// Build and validate autoscaling parameters from flags
pub fn scaling_params(args: &ScaleArgs) -> Result<AutoscalingParams, CliError> {
    if let Some(mode) = &args.cpu_mode {
        if mode != "SHARED" && mode != "DEDICATED" {
            return Err(invalid_scaling(
                "Invalid --cpu-mode: must be SHARED or DEDICATED",
                "Use: --cpu-mode SHARED or --cpu-mode DEDICATED",
            ));
        }
    }

    let params = AutoscalingParams {
        cpu_mode: args.cpu_mode.clone(),
        min_cpu: args.min_cpu,
        max_cpu: args.max_cpu,
        min_ram: args.min_ram,
        max_ram: args.max_ram,
        min_disk: args.min_disk,
        max_disk: args.max_disk,
        horizontal_min_count: args.min_replicas,
        horizontal_max_count: args.max_replicas,
        ..Default::default()
    };

    if params.is_empty() {
        return Err(invalid_scaling(
            "At least one scaling parameter required",
            "Available: --cpu-mode, --min-cpu, --max-cpu, --min-ram, --max-ram, --min-disk, \
             --max-disk, --min-replicas, --max-replicas",
        ));
    }

    check_bounds(params.min_cpu, params.max_cpu, "minCpu", "maxCpu", "cpu")?;
    check_bounds(params.min_ram, params.max_ram, "minRam", "maxRam", "ram")?;
    check_bounds(params.min_disk, params.max_disk, "minDisk", "maxDisk", "disk")?;
    check_bounds(
        params.horizontal_min_count,
        params.horizontal_max_count,
        "minReplicas",
        "maxReplicas",
        "replicas",
    )?;

    Ok(params)
}

fn check_bounds<T: PartialOrd>(
    min: Option<T>,
    max: Option<T>,
    min_name: &str,
    max_name: &str,
    flag: &str,
) -> Result<(), CliError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(invalid_scaling(
            &format!("Invalid scaling parameters: {min_name} must be <= {max_name}"),
            &format!("Set --min-{flag} <= --max-{flag}"),
        )),
        _ => Ok(()),
    }
}

fn invalid_scaling(message: &str, suggestion: &str) -> CliError {
    CliError::new(ErrorCode::InvalidScaling, message).with_suggestion(suggestion)
}
