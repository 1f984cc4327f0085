//! User and project endpoints

use serde::Deserialize;

use crate::errors::CliError;
use crate::http::client::ApiClient;
use crate::http::search::{SearchRequest, SearchResponse};
use crate::models::project::{Project, UserInfo};
use crate::platform::classify::Entity;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserInfoResponse {
    id: String,
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    client_user_list: Vec<ClientUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientUser {
    client_id: String,
}

impl ApiClient {
    /// Fetch the token owner; `id` is the client the user acts under
    pub async fn fetch_user_info(&self) -> Result<UserInfo, CliError> {
        let response: UserInfoResponse = self.get("/user/info", Entity::Other).await?;
        let id = response
            .client_user_list
            .first()
            .map(|c| c.client_id.clone())
            .unwrap_or(response.id);

        Ok(UserInfo {
            id,
            full_name: response.full_name,
            email: response.email,
        })
    }

    /// Projects of a client visible to the token
    pub async fn search_projects(&self, client_id: &str) -> Result<Vec<Project>, CliError> {
        let body = SearchRequest::new().eq("clientId", client_id);
        let response: SearchResponse<Project> =
            self.post("/project/search", Entity::Project, &body).await?;
        Ok(response.items)
    }

    /// Get a single project
    pub async fn fetch_project(&self, project_id: &str) -> Result<Project, CliError> {
        let path = format!("/project/{}", project_id);
        self.get(&path, Entity::Project).await
    }
}
