//! Service stack endpoints

use serde::{Deserialize, Serialize};

use crate::errors::CliError;
use crate::http::client::ApiClient;
use crate::http::search::{SearchRequest, SearchResponse};
use crate::models::import::ImportResult;
use crate::models::process::Process;
use crate::models::service::{Autoscaling, AutoscalingParams, ServicePort, ServiceStack};
use crate::platform::classify::Entity;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceStackDto {
    id: String,
    name: String,
    #[serde(default)]
    project_id: String,
    #[serde(default)]
    service_stack_type_info: Option<TypeInfoDto>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    mode: String,
    #[serde(default)]
    ports: Option<Vec<ServicePort>>,
    #[serde(default)]
    custom_autoscaling: Option<Autoscaling>,
    #[serde(default)]
    created: String,
    #[serde(default)]
    last_update: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypeInfoDto {
    #[serde(default)]
    service_stack_type_version_name: String,
}

impl From<ServiceStackDto> for ServiceStack {
    fn from(dto: ServiceStackDto) -> Self {
        ServiceStack {
            id: dto.id,
            hostname: dto.name,
            project_id: dto.project_id,
            type_version: dto
                .service_stack_type_info
                .map(|t| t.service_stack_type_version_name)
                .unwrap_or_default(),
            status: dto.status,
            mode: dto.mode,
            ports: dto.ports.unwrap_or_default(),
            autoscaling: dto.custom_autoscaling,
            created: dto.created,
            last_update: dto.last_update,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AutoscalingResponse {
    #[serde(default)]
    process: Option<Process>,
}

#[derive(Debug, Clone, Serialize)]
struct ImportRequest<'a> {
    yaml: &'a str,
}

impl ApiClient {
    /// Services of a project
    pub async fn search_services(
        &self,
        client_id: &str,
        project_id: &str,
    ) -> Result<Vec<ServiceStack>, CliError> {
        let body = SearchRequest::new()
            .eq("clientId", client_id)
            .eq("projectId", project_id);
        let response: SearchResponse<ServiceStackDto> = self
            .post("/service-stack/search", Entity::Project, &body)
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter(|s| s.project_id == project_id)
            .map(ServiceStack::from)
            .collect())
    }

    /// Get a single service
    pub async fn fetch_service(&self, service_id: &str) -> Result<ServiceStack, CliError> {
        let path = format!("/service-stack/{}", service_id);
        let dto: ServiceStackDto = self.get(&path, Entity::Service).await?;
        Ok(dto.into())
    }

    /// Run a lifecycle action (`start`, `stop`, `restart`, ...) on a service
    pub async fn service_action(&self, service_id: &str, action: &str) -> Result<Process, CliError> {
        let path = format!("/service-stack/{}/{}", service_id, action);
        self.put_action(&path, Entity::Service).await
    }

    /// Update autoscaling; `None` when applied without a process
    pub async fn update_autoscaling(
        &self,
        service_id: &str,
        params: &AutoscalingParams,
    ) -> Result<Option<Process>, CliError> {
        let path = format!("/service-stack/{}/autoscaling", service_id);
        let response: AutoscalingResponse = self.put(&path, Entity::Service, params).await?;
        Ok(response.process)
    }

    /// Delete a service
    pub async fn remove_service(&self, service_id: &str) -> Result<Process, CliError> {
        let path = format!("/service-stack/{}", service_id);
        self.delete(&path, Entity::Service).await
    }

    /// Import services described by YAML into a project
    pub async fn import_yaml(&self, project_id: &str, yaml: &str) -> Result<ImportResult, CliError> {
        let path = format!("/project/{}/service-stack/import", project_id);
        self.post(&path, Entity::Project, &ImportRequest { yaml }).await
    }
}
