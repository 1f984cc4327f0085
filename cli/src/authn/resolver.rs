//! Credential resolution

use secrecy::SecretString;

use crate::errors::{CliError, ErrorCode};
use crate::storage::credentials::{CredentialStore, StoredCredentials};

/// Identity used for one invocation
#[derive(Debug)]
pub struct Credentials {
    pub token: SecretString,
    pub api_host: String,
    pub project_id: String,
    pub project_name: String,
    pub region: String,
}

/// Validate a stored record. No network I/O happens here; a revoked token surfaces on the
/// first platform call instead.
pub fn validate(stored: Option<StoredCredentials>) -> Result<Credentials, CliError> {
    let stored = match stored {
        Some(stored) if !stored.token.is_empty() => stored,
        _ => return Err(auth_required("Not authenticated")),
    };

    if stored.project.id.is_empty() {
        return Err(auth_required("Authenticated but no project discovered"));
    }

    Ok(Credentials {
        token: SecretString::from(stored.token),
        api_host: stored.api_host,
        project_id: stored.project.id,
        project_name: stored.project.name,
        region: stored.region_data.name,
    })
}

/// Load and validate the stored record.
///
/// An unreadable or corrupt file counts as not authenticated.
pub async fn resolve(store: &CredentialStore) -> Result<Credentials, CliError> {
    let stored = match store.load().await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!("ignoring unreadable credential file: {}", e);
            None
        }
    };
    validate(stored)
}

fn auth_required(message: &str) -> CliError {
    CliError::new(ErrorCode::AuthRequired, message).with_suggestion("Run: zaia login <token>")
}
