//! Environment variable endpoints

use serde::Serialize;

use crate::errors::CliError;
use crate::http::client::ApiClient;
use crate::http::search::{SearchRequest, SearchResponse};
use crate::models::env::EnvVar;
use crate::models::process::Process;
use crate::platform::classify::Entity;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvFileRequest<'a> {
    env_file: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectEnvRequest<'a> {
    project_id: &'a str,
    key: &'a str,
    content: &'a str,
    sensitive: bool,
}

impl ApiClient {
    /// Variables of a service
    pub async fn search_user_data(
        &self,
        client_id: &str,
        service_id: &str,
    ) -> Result<Vec<EnvVar>, CliError> {
        let body = SearchRequest::new()
            .eq("clientId", client_id)
            .eq("serviceStackId", service_id);
        let response: SearchResponse<EnvVar> =
            self.post("/user-data/search", Entity::Service, &body).await?;
        Ok(response.items)
    }

    /// Upload service variables in `.env` format
    pub async fn upload_env_file(&self, service_id: &str, content: &str) -> Result<Process, CliError> {
        let path = format!("/service-stack/{}/user-data-env-file", service_id);
        let body = EnvFileRequest { env_file: content };
        self.put(&path, Entity::Service, &body).await
    }

    /// Delete a service variable
    pub async fn remove_user_data(&self, user_data_id: &str) -> Result<Process, CliError> {
        let path = format!("/user-data/{}", user_data_id);
        self.delete(&path, Entity::Service).await
    }

    /// Variables of a project
    pub async fn search_project_env(
        &self,
        client_id: &str,
        project_id: &str,
    ) -> Result<Vec<EnvVar>, CliError> {
        let body = SearchRequest::new()
            .eq("clientId", client_id)
            .eq("projectId", project_id);
        let response: SearchResponse<EnvVar> =
            self.post("/project-env/search", Entity::Project, &body).await?;
        Ok(response.items)
    }

    /// Create a project variable
    pub async fn add_project_env(
        &self,
        project_id: &str,
        key: &str,
        content: &str,
        sensitive: bool,
    ) -> Result<Process, CliError> {
        let body = ProjectEnvRequest {
            project_id,
            key,
            content,
            sensitive,
        };
        self.post("/project-env", Entity::Project, &body).await
    }

    /// Delete a project variable
    pub async fn remove_project_env(&self, env_id: &str) -> Result<Process, CliError> {
        let path = format!("/project-env/{}", env_id);
        self.delete(&path, Entity::Project).await
    }
}
