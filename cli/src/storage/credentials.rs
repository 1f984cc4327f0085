//! Credential file management

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CliError;
use crate::filesys::file::File;

/// Region the API host belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionData {
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gui_address: Option<String>,
}

/// Project the token is scoped to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

/// User owning the token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub name: String,
    pub email: String,
}

/// The single identity record stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredentials {
    /// Project-scoped access token
    #[serde(default)]
    pub token: String,

    /// API host, without scheme
    #[serde(default)]
    pub api_host: String,

    #[serde(default)]
    pub region_data: RegionData,

    #[serde(default)]
    pub project: ProjectRef,

    #[serde(default)]
    pub user: UserRef,
}

/// Loads and persists [`StoredCredentials`]
#[derive(Debug, Clone)]
pub struct CredentialStore {
    file: File,
}

impl CredentialStore {
    pub fn new(file: File) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    /// Load the record; a missing file yields `None`
    pub async fn load(&self) -> Result<Option<StoredCredentials>, CliError> {
        debug!("loading credentials from {}", self.file.path().display());
        self.file.read_json_opt().await
    }

    /// Replace the record atomically
    pub async fn save(&self, credentials: &StoredCredentials) -> Result<(), CliError> {
        debug!("saving credentials to {}", self.file.path().display());
        self.file.write_json_private(credentials).await
    }

    /// Remove the record; idempotent
    pub async fn clear(&self) -> Result<(), CliError> {
        self.file.delete().await
    }
}
