//! login, logout and status

use serde_json::json;
use tracing::warn;

use crate::app::context::AppContext;
use crate::authn::login::{self, LoginRequest};
use crate::authn::resolver;
use crate::errors::{CliError, ErrorCode};
use crate::output::envelope::Envelope;

pub async fn login(
    ctx: &AppContext,
    token: &str,
    url: Option<String>,
    region: Option<String>,
) -> Result<Envelope, CliError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CliError::new(ErrorCode::AuthInvalidToken, "Token is empty")
            .with_suggestion("Run: zaia login <token>"));
    }

    let api_host = url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| ctx.options.default_api_host.clone());
    let region = region
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| ctx.options.default_region.clone());

    let platform = ctx.connect_with(token, &api_host)?;
    let request = LoginRequest {
        token: token.to_string(),
        api_host,
        region,
    };
    let outcome = login::login(platform.as_ref(), &ctx.store, &request).await?;
    Ok(Envelope::sync(outcome))
}

pub async fn logout(ctx: &AppContext) -> Result<Envelope, CliError> {
    ctx.store.clear().await?;
    Ok(Envelope::message("Logged out"))
}

pub async fn status(ctx: &AppContext) -> Result<Envelope, CliError> {
    let stored = match ctx.store.load().await {
        Ok(stored) => stored,
        Err(e) => {
            warn!("ignoring unreadable credential file: {}", e);
            None
        }
    };
    let user = stored.as_ref().map(|s| s.user.clone()).unwrap_or_default();
    let credentials = resolver::validate(stored)?;

    Ok(Envelope::sync(json!({
        "authenticated": true,
        "user": { "name": user.name, "email": user.email },
        "project": { "id": credentials.project_id, "name": credentials.project_name },
        "region": credentials.region,
        "apiHost": credentials.api_host,
    })))
}
