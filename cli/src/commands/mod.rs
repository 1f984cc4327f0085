//! Command handlers
//!
//! Each handler returns the envelope to emit; writing it is left to the dispatcher.

pub mod auth;
pub mod delete;
pub mod discover;
pub mod env;
pub mod events;
pub mod import;
pub mod lifecycle;
pub mod logs;
pub mod process;
pub mod subdomain;
pub mod version;

use crate::app::context::Session;
use crate::errors::CliError;
use crate::models::service::ServiceStack;
use crate::services::resolver::resolve_service;

/// The `--service` value, rejecting a missing or blank one
pub(crate) fn require_service(service: Option<&str>) -> Result<&str, CliError> {
    service
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(CliError::service_required)
}

/// Fetch the project's services and resolve `hostname` among them
pub(crate) async fn find_service(
    session: &Session,
    hostname: &str,
) -> Result<ServiceStack, CliError> {
    let services = session
        .platform
        .list_services(session.project_id())
        .await?;
    resolve_service(hostname, &services).cloned()
}
