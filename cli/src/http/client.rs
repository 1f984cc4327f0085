//! HTTP client implementation

use std::time::Duration;

use reqwest::{header, Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::errors::CliError;
use crate::platform::classify::{classify_status, classify_transport, Entity};

/// Path prefix of the public REST API
pub const API_PREFIX: &str = "/api/rest/public";

/// HTTP client for the platform REST API
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: SecretString,
    client_id: OnceCell<String>,
}

impl ApiClient {
    /// Create a client for `api_host`, which may omit the scheme (https is assumed)
    pub fn new(api_host: &str, token: SecretString, timeout: Duration) -> Result<Self, CliError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CliError::api(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: format!("{}{}", host_url(api_host), API_PREFIX),
            token,
            client_id: OnceCell::new(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client (organization) ID of the token owner, fetched once per client
    pub async fn client_id(&self) -> Result<&str, CliError> {
        let id = self
            .client_id
            .get_or_try_init(|| async { self.fetch_user_info().await.map(|u| u.id) })
            .await?;
        Ok(id.as_str())
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str, entity: Entity) -> Result<T, CliError> {
        let url = self.url(path);
        debug!("GET {}", url);
        self.send(self.client.get(&url), entity).await
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        entity: Entity,
        body: &B,
    ) -> Result<T, CliError> {
        let url = self.url(path);
        debug!("POST {}", url);
        self.send(self.client.post(&url).json(body), entity).await
    }

    /// Make a PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        entity: Entity,
        body: &B,
    ) -> Result<T, CliError> {
        let url = self.url(path);
        debug!("PUT {}", url);
        self.send(self.client.put(&url).json(body), entity).await
    }

    /// Make a PUT request without a body, as used by action endpoints
    pub async fn put_action<T: DeserializeOwned>(
        &self,
        path: &str,
        entity: Entity,
    ) -> Result<T, CliError> {
        let url = self.url(path);
        debug!("PUT {}", url);
        self.send(self.client.put(&url), entity).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        entity: Entity,
    ) -> Result<T, CliError> {
        let url = self.url(path);
        debug!("DELETE {}", url);
        self.send(self.client.delete(&url), entity).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        entity: Entity,
    ) -> Result<T, CliError> {
        let response = request
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("request failed: {} - {}", status, body);
            return Err(classify_status(status.as_u16(), entity, &body));
        }

        response.json().await.map_err(|e| classify_transport(&e))
    }
}

/// Prefix a bare host with https://
pub fn host_url(api_host: &str) -> String {
    let host = api_host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}
