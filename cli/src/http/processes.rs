//! Process and activity history endpoints

use crate::errors::CliError;
use crate::http::client::ApiClient;
use crate::http::search::{SearchRequest, SearchResponse};
use crate::models::activity::{AppVersionEvent, ProcessEvent};
use crate::models::process::Process;
use crate::platform::classify::Entity;

impl ApiClient {
    /// Get a process
    pub async fn fetch_process(&self, process_id: &str) -> Result<Process, CliError> {
        let path = format!("/process/{}", process_id);
        self.get(&path, Entity::Process).await
    }

    /// Request cancellation of a process
    pub async fn request_cancel(&self, process_id: &str) -> Result<Process, CliError> {
        let path = format!("/process/{}/cancel", process_id);
        self.put_action(&path, Entity::Process).await
    }

    /// Recent processes of a project, newest first
    pub async fn search_process_history(
        &self,
        client_id: &str,
        project_id: &str,
        limit: usize,
    ) -> Result<Vec<ProcessEvent>, CliError> {
        let body = SearchRequest::new()
            .eq("clientId", client_id)
            .eq("projectId", project_id)
            .newest_first("created")
            .limit(limit);
        let response: SearchResponse<ProcessEvent> =
            self.post("/process/search", Entity::Project, &body).await?;
        Ok(response.items)
    }

    /// Recent application versions of a project, newest first
    pub async fn search_app_version_history(
        &self,
        client_id: &str,
        project_id: &str,
        limit: usize,
    ) -> Result<Vec<AppVersionEvent>, CliError> {
        let body = SearchRequest::new()
            .eq("clientId", client_id)
            .eq("projectId", project_id)
            .newest_first("created")
            .limit(limit);
        let response: SearchResponse<AppVersionEvent> =
            self.post("/app-version/search", Entity::Project, &body).await?;
        Ok(response.items)
    }
}
