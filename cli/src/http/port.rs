//! REST implementation of [`PlatformPort`]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::errors::CliError;
use crate::http::client::ApiClient;
use crate::models::activity::{AppVersionEvent, ProcessEvent};
use crate::models::env::EnvVar;
use crate::models::import::ImportResult;
use crate::models::logs::LogAccess;
use crate::models::process::Process;
use crate::models::project::{Project, UserInfo};
use crate::models::service::{AutoscalingParams, ServiceStack};
use crate::platform::port::{Connector, PlatformPort};

#[async_trait]
impl PlatformPort for ApiClient {
    async fn get_user_info(&self) -> Result<UserInfo, CliError> {
        self.fetch_user_info().await
    }

    async fn list_projects(&self, client_id: &str) -> Result<Vec<Project>, CliError> {
        self.search_projects(client_id).await
    }

    async fn get_project(&self, project_id: &str) -> Result<Project, CliError> {
        self.fetch_project(project_id).await
    }

    async fn list_services(&self, project_id: &str) -> Result<Vec<ServiceStack>, CliError> {
        let client_id = self.client_id().await?;
        self.search_services(client_id, project_id).await
    }

    async fn get_service(&self, service_id: &str) -> Result<ServiceStack, CliError> {
        self.fetch_service(service_id).await
    }

    async fn start_service(&self, service_id: &str) -> Result<Process, CliError> {
        self.service_action(service_id, "start").await
    }

    async fn stop_service(&self, service_id: &str) -> Result<Process, CliError> {
        self.service_action(service_id, "stop").await
    }

    async fn restart_service(&self, service_id: &str) -> Result<Process, CliError> {
        self.service_action(service_id, "restart").await
    }

    async fn set_autoscaling(
        &self,
        service_id: &str,
        params: &AutoscalingParams,
    ) -> Result<Option<Process>, CliError> {
        self.update_autoscaling(service_id, params).await
    }

    async fn get_service_env(&self, service_id: &str) -> Result<Vec<EnvVar>, CliError> {
        let client_id = self.client_id().await?;
        self.search_user_data(client_id, service_id).await
    }

    async fn set_service_env_file(
        &self,
        service_id: &str,
        content: &str,
    ) -> Result<Process, CliError> {
        self.upload_env_file(service_id, content).await
    }

    async fn delete_user_data(&self, user_data_id: &str) -> Result<Process, CliError> {
        self.remove_user_data(user_data_id).await
    }

    async fn get_project_env(&self, project_id: &str) -> Result<Vec<EnvVar>, CliError> {
        let client_id = self.client_id().await?;
        self.search_project_env(client_id, project_id).await
    }

    async fn create_project_env(
        &self,
        project_id: &str,
        key: &str,
        content: &str,
        sensitive: bool,
    ) -> Result<Process, CliError> {
        self.add_project_env(project_id, key, content, sensitive).await
    }

    async fn delete_project_env(&self, env_id: &str) -> Result<Process, CliError> {
        self.remove_project_env(env_id).await
    }

    async fn import_services(
        &self,
        project_id: &str,
        yaml: &str,
    ) -> Result<ImportResult, CliError> {
        self.import_yaml(project_id, yaml).await
    }

    async fn delete_service(&self, service_id: &str) -> Result<Process, CliError> {
        self.remove_service(service_id).await
    }

    async fn get_process(&self, process_id: &str) -> Result<Process, CliError> {
        self.fetch_process(process_id).await
    }

    async fn cancel_process(&self, process_id: &str) -> Result<Process, CliError> {
        self.request_cancel(process_id).await
    }

    async fn enable_subdomain_access(&self, service_id: &str) -> Result<Process, CliError> {
        self.service_action(service_id, "enable-subdomain-access").await
    }

    async fn disable_subdomain_access(&self, service_id: &str) -> Result<Process, CliError> {
        self.service_action(service_id, "disable-subdomain-access").await
    }

    async fn get_project_log(&self, project_id: &str) -> Result<LogAccess, CliError> {
        self.fetch_log_access(project_id).await
    }

    async fn search_processes(
        &self,
        project_id: &str,
        limit: usize,
    ) -> Result<Vec<ProcessEvent>, CliError> {
        let client_id = self.client_id().await?;
        self.search_process_history(client_id, project_id, limit).await
    }

    async fn search_app_versions(
        &self,
        project_id: &str,
        limit: usize,
    ) -> Result<Vec<AppVersionEvent>, CliError> {
        let client_id = self.client_id().await?;
        self.search_app_version_history(client_id, project_id, limit)
            .await
    }
}

/// Connects to the REST API with a fixed per-call deadline
#[derive(Debug, Clone)]
pub struct RestConnector {
    timeout: Duration,
}

impl RestConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Connector for RestConnector {
    fn connect(
        &self,
        token: &SecretString,
        api_host: &str,
    ) -> Result<Arc<dyn PlatformPort>, CliError> {
        let client = ApiClient::new(api_host, token.clone(), self.timeout)?;
        Ok(Arc::new(client))
    }
}
