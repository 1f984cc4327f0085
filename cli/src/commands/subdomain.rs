//! subdomain enable and disable

use serde_json::json;
use tracing::info;

use crate::app::context::AppContext;
use crate::cli::ServiceArgs;
use crate::commands::{find_service, require_service};
use crate::errors::{CliError, ErrorCode};
use crate::output::envelope::{Envelope, ProcessOutput};
use crate::process::idempotency::{is_already_in_state, Toggle};

/// Toggle subdomain access; "already in that state" failures become a sync success
pub async fn toggle(
    ctx: &AppContext,
    toggle: Toggle,
    args: &ServiceArgs,
) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    let hostname = require_service(args.service.as_deref())?;

    let service = find_service(&session, hostname).await?;
    let result = match toggle {
        Toggle::Enable => session.platform.enable_subdomain_access(&service.id).await,
        Toggle::Disable => session.platform.disable_subdomain_access(&service.id).await,
    };

    match result {
        Ok(process) => {
            let mut out = ProcessOutput::from_process(&process, Some(hostname));
            out.action_name = format!("{}Subdomain", toggle.action());
            Ok(Envelope::initiated(vec![out], "Subdomain access updated"))
        }
        Err(e) if is_already_in_state(&e, toggle) => {
            info!("subdomain of {} is {}", hostname, toggle.already_status());
            Ok(Envelope::sync(json!({
                "serviceHostname": hostname,
                "serviceId": service.id,
                "action": toggle.action(),
                "status": toggle.already_status(),
            })))
        }
        Err(e) => Err(as_api_error(e)),
    }
}

/// Other toggle failures are reported as `API_ERROR`, keeping message and detail
fn as_api_error(err: CliError) -> CliError {
    CliError {
        code: ErrorCode::ApiError,
        ..err
    }
}
