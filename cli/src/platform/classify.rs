//! Translation of HTTP and transport failures into the error taxonomy

use serde::Deserialize;

use crate::errors::{CliError, ErrorCode};

/// What a request was addressing, used to pick the not-found code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Service,
    Process,
    Project,
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Classify a non-success HTTP response
pub fn classify_status(status: u16, entity: Entity, body: &str) -> CliError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_default();
    let message = detail
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("API error (HTTP {status})"));

    let err = match status {
        401 => CliError::new(ErrorCode::AuthTokenExpired, message)
            .with_suggestion("Run: zaia login <token>"),
        403 => CliError::new(ErrorCode::PermissionDenied, message)
            .with_suggestion("Check token permissions for this project"),
        404 => match entity {
            Entity::Process => CliError::new(ErrorCode::ProcessNotFound, message),
            Entity::Project => CliError::api(message)
                .with_suggestion("Project may have been deleted. Run: zaia login <token>"),
            _ => CliError::new(ErrorCode::ServiceNotFound, message)
                .with_suggestion("Run: zaia discover"),
        },
        429 => CliError::new(ErrorCode::ApiRateLimited, message)
            .with_suggestion("Wait and retry"),
        s if s >= 500 => CliError::api(message).with_suggestion("Platform error, retry later"),
        _ => CliError::api(message),
    };

    match detail.code.filter(|c| !c.is_empty()) {
        Some(code) => err.with_platform_code(code),
        None => err,
    }
}

/// Classify a failure that happened before an HTTP status was received
pub fn classify_transport(err: &reqwest::Error) -> CliError {
    if err.is_timeout() {
        CliError::new(ErrorCode::ApiTimeout, format!("Request timed out: {err}"))
            .with_suggestion("Retry the command")
    } else if err.is_connect() || err.is_request() {
        CliError::new(ErrorCode::NetworkError, format!("Network error: {err}"))
            .with_suggestion("Check network connectivity and the API host")
    } else if err.is_decode() {
        CliError::api(format!("Unexpected API response: {err}"))
    } else {
        CliError::api(format!("API request failed: {err}"))
    }
}
