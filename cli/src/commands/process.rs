//! process and cancel

use crate::app::context::AppContext;
use crate::errors::{CliError, ErrorCode};
use crate::output::envelope::{Envelope, ProcessOutput};
use crate::process::lifecycle::{is_terminal, CANCELED};

pub async fn show(ctx: &AppContext, process_id: &str) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    let process = session.platform.get_process(process_id).await?;
    Ok(Envelope::sync(ProcessOutput::from_process(&process, None)))
}

/// Cancel a process that has not reached a terminal state.
///
/// A terminal process is rejected without calling cancel. The reported status is `CANCELED`
/// whatever the platform answers, since the request was accepted.
pub async fn cancel(ctx: &AppContext, process_id: &str) -> Result<Envelope, CliError> {
    let session = ctx.session().await?;
    let platform = session.platform.as_ref();

    let current = platform.get_process(process_id).await?;
    let status = ProcessOutput::from_process(&current, None).status;
    if is_terminal(&status) {
        return Err(CliError::new(
            ErrorCode::ProcessAlreadyTerminal,
            format!("Process is already in terminal state: {status}"),
        )
        .with_suggestion(format!("Process {process_id} has already completed")));
    }

    let updated = platform.cancel_process(process_id).await?;
    let mut out = ProcessOutput::from_process(&updated, None);
    out.status = CANCELED.to_string();
    Ok(Envelope::sync(out))
}
