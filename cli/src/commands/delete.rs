//! delete

use serde_json::json;

use crate::app::context::AppContext;
use crate::commands::{find_service, require_service};
use crate::errors::{CliError, ErrorCode};
use crate::output::envelope::{Envelope, ProcessOutput};

/// Delete a service; refuses without `--confirm`
pub async fn delete(
    ctx: &AppContext,
    service: Option<&str>,
    confirm: bool,
) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    let hostname = require_service(service)?;

    if !confirm {
        return Err(CliError::new(
            ErrorCode::ConfirmRequired,
            "Destructive operation requires --confirm flag",
        )
        .with_suggestion(format!("Run: zaia delete --service {hostname} --confirm"))
        .with_context(json!({
            "wouldDelete": { "type": "service", "hostname": hostname },
        })));
    }

    let target = find_service(&session, hostname).await?;
    let process = session.platform.delete_service(&target.id).await?;

    Ok(Envelope::initiated(
        vec![ProcessOutput::from_process(&process, Some(hostname))],
        &format!("Service {hostname} deleted"),
    ))
}
