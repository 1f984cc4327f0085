//! Hostname to service resolution

use serde_json::json;

use crate::errors::{CliError, ErrorCode};
use crate::models::service::ServiceStack;

/// Find a service by exact, case-sensitive hostname in an already fetched list
pub fn resolve_service<'a>(
    hostname: &str,
    services: &'a [ServiceStack],
) -> Result<&'a ServiceStack, CliError> {
    services
        .iter()
        .find(|service| service.hostname == hostname)
        .ok_or_else(|| not_found(hostname, services))
}

/// Hostnames of all services, in platform order
pub fn hostnames(services: &[ServiceStack]) -> Vec<String> {
    services.iter().map(|s| s.hostname.clone()).collect()
}

fn not_found(hostname: &str, services: &[ServiceStack]) -> CliError {
    let available = hostnames(services);
    let suggestion = if available.is_empty() {
        "Project has no services".to_string()
    } else {
        format!("Available services: {}", available.join(", "))
    };

    CliError::new(
        ErrorCode::ServiceNotFound,
        format!("Service '{hostname}' not found"),
    )
    .with_suggestion(suggestion)
    .with_context(json!({
        "requestedService": hostname,
        "availableHostnames": available,
    }))
}
