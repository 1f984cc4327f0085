//! Login protocol

use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::errors::{CliError, ErrorCode};
use crate::platform::port::PlatformPort;
use crate::storage::credentials::{
    CredentialStore, ProjectRef, RegionData, StoredCredentials, UserRef,
};

/// What the caller asked to log in with
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub token: String,
    pub api_host: String,
    pub region: String,
}

/// Identity established by a successful login
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginOutcome {
    pub user: UserRef,
    pub project: ProjectRef,
    pub region: String,
}

/// Validate the token, discover its single project, and persist the record.
///
/// Nothing is written unless every step succeeds, so a failed login leaves any previous
/// credentials in place.
pub async fn login(
    platform: &dyn PlatformPort,
    store: &CredentialStore,
    request: &LoginRequest,
) -> Result<LoginOutcome, CliError> {
    let user = platform.get_user_info().await.map_err(|e| match e.code {
        ErrorCode::NetworkError | ErrorCode::ApiTimeout => e,
        _ => CliError::new(
            ErrorCode::AuthInvalidToken,
            format!("Authentication failed: invalid token ({})", e.message),
        )
        .with_suggestion("Check the token and try again"),
    })?;

    let projects = platform.list_projects(&user.id).await.map_err(|e| {
        CliError::new(
            ErrorCode::AuthApiError,
            format!("Failed to list projects: {}", e.message),
        )
        .with_suggestion("Check network connectivity and token permissions")
    })?;
    let project = match projects.as_slice() {
        [] => {
            return Err(CliError::new(
                ErrorCode::TokenNoProject,
                "Token has no access to any project",
            )
            .with_suggestion("Create a project-scoped token"))
        }
        [project] => project.clone(),
        many => {
            let names: Vec<&str> = many.iter().map(|p| p.name.as_str()).collect();
            return Err(CliError::new(
                ErrorCode::TokenMultiProject,
                format!(
                    "Token has access to {} projects ({}); a project-scoped token is required",
                    many.len(),
                    names.join(", ")
                ),
            )
            .with_suggestion("Create a token scoped to a single project")
            .with_context(json!({ "projects": names })));
        }
    };

    let outcome = LoginOutcome {
        user: UserRef {
            name: user.full_name.clone(),
            email: user.email.clone(),
        },
        project: ProjectRef {
            id: project.id.clone(),
            name: project.name.clone(),
        },
        region: request.region.clone(),
    };

    let record = StoredCredentials {
        token: request.token.clone(),
        api_host: request.api_host.clone(),
        region_data: RegionData {
            name: request.region.clone(),
            is_default: true,
            address: request.api_host.clone(),
            gui_address: None,
        },
        project: outcome.project.clone(),
        user: outcome.user.clone(),
    };
    store.save(&record).await?;

    info!("logged in to project {} ({})", project.name, project.id);
    Ok(outcome)
}
