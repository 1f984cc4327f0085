//! events

use serde_json::json;

use crate::app::context::AppContext;
use crate::errors::CliError;
use crate::output::envelope::Envelope;
use crate::timeline;

pub async fn events(
    ctx: &AppContext,
    service: Option<&str>,
    limit: usize,
) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    if limit == 0 {
        return Err(CliError::invalid_parameter("--limit must be at least 1"));
    }

    let service = service.filter(|s| !s.is_empty());
    let timeline = timeline::build(
        session.platform.as_ref(),
        session.project_id(),
        service,
        limit,
    )
    .await?;

    Ok(Envelope::sync(json!({
        "projectId": session.project_id(),
        "summary": {
            "total": timeline.events.len(),
            "processes": timeline.process_count,
            "deploys": timeline.deploy_count,
        },
        "events": timeline.events,
    })))
}
