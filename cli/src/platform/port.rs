//! Platform capability traits

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::errors::CliError;
use crate::models::activity::{AppVersionEvent, ProcessEvent};
use crate::models::env::EnvVar;
use crate::models::import::ImportResult;
use crate::models::logs::{LogAccess, LogEntry, LogQuery};
use crate::models::process::Process;
use crate::models::project::{Project, UserInfo};
use crate::models::service::{AutoscalingParams, ServiceStack};

/// Operations the command layer needs from the platform.
///
/// Implementations translate every failure into a classified [`CliError`] before returning.
#[async_trait]
pub trait PlatformPort: Send + Sync {
    async fn get_user_info(&self) -> Result<UserInfo, CliError>;

    async fn list_projects(&self, client_id: &str) -> Result<Vec<Project>, CliError>;

    async fn get_project(&self, project_id: &str) -> Result<Project, CliError>;

    async fn list_services(&self, project_id: &str) -> Result<Vec<ServiceStack>, CliError>;

    async fn get_service(&self, service_id: &str) -> Result<ServiceStack, CliError>;

    async fn start_service(&self, service_id: &str) -> Result<Process, CliError>;

    async fn stop_service(&self, service_id: &str) -> Result<Process, CliError>;

    async fn restart_service(&self, service_id: &str) -> Result<Process, CliError>;

    /// `None` when the platform applied the change without a trackable process
    async fn set_autoscaling(
        &self,
        service_id: &str,
        params: &AutoscalingParams,
    ) -> Result<Option<Process>, CliError>;

    async fn get_service_env(&self, service_id: &str) -> Result<Vec<EnvVar>, CliError>;

    /// Upload service variables as a `.env` formatted body
    async fn set_service_env_file(
        &self,
        service_id: &str,
        content: &str,
    ) -> Result<Process, CliError>;

    /// Delete a service variable by id
    async fn delete_user_data(&self, user_data_id: &str) -> Result<Process, CliError>;

    async fn get_project_env(&self, project_id: &str) -> Result<Vec<EnvVar>, CliError>;

    async fn create_project_env(
        &self,
        project_id: &str,
        key: &str,
        content: &str,
        sensitive: bool,
    ) -> Result<Process, CliError>;

    async fn delete_project_env(&self, env_id: &str) -> Result<Process, CliError>;

    async fn import_services(&self, project_id: &str, yaml: &str)
        -> Result<ImportResult, CliError>;

    async fn delete_service(&self, service_id: &str) -> Result<Process, CliError>;

    async fn get_process(&self, process_id: &str) -> Result<Process, CliError>;

    async fn cancel_process(&self, process_id: &str) -> Result<Process, CliError>;

    async fn enable_subdomain_access(&self, service_id: &str) -> Result<Process, CliError>;

    async fn disable_subdomain_access(&self, service_id: &str) -> Result<Process, CliError>;

    /// Access handle for the project's log backend
    async fn get_project_log(&self, project_id: &str) -> Result<LogAccess, CliError>;

    async fn search_processes(
        &self,
        project_id: &str,
        limit: usize,
    ) -> Result<Vec<ProcessEvent>, CliError>;

    async fn search_app_versions(
        &self,
        project_id: &str,
        limit: usize,
    ) -> Result<Vec<AppVersionEvent>, CliError>;
}

/// Fetches log entries from the backend named by a [`LogAccess`] handle
#[async_trait]
pub trait LogFetcher: Send + Sync {
    /// Entries in chronological order, at most `query.limit` of them
    async fn fetch_logs(
        &self,
        access: &LogAccess,
        query: &LogQuery,
    ) -> Result<Vec<LogEntry>, CliError>;
}

/// Builds a platform client for a token and API host
pub trait Connector: Send + Sync {
    fn connect(&self, token: &SecretString, api_host: &str)
        -> Result<Arc<dyn PlatformPort>, CliError>;
}
