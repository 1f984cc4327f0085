//! Per-invocation collaborators

use std::sync::Arc;

use secrecy::SecretString;

use crate::app::options::AppOptions;
use crate::authn::resolver::{self, Credentials};
use crate::errors::CliError;
use crate::platform::port::{Connector, LogFetcher, PlatformPort};
use crate::storage::credentials::CredentialStore;

/// Everything a command needs besides its arguments
pub struct AppContext {
    pub options: AppOptions,
    pub store: CredentialStore,
    pub connector: Arc<dyn Connector>,
    pub log_fetcher: Arc<dyn LogFetcher>,
}

impl AppContext {
    pub fn new(
        options: AppOptions,
        connector: Arc<dyn Connector>,
        log_fetcher: Arc<dyn LogFetcher>,
    ) -> Self {
        let store = CredentialStore::new(options.storage.credentials_file());
        Self {
            options,
            store,
            connector,
            log_fetcher,
        }
    }

    /// Resolve stored credentials and connect to their API host.
    ///
    /// Fails with `AUTH_REQUIRED` before any network I/O when nobody is logged in.
    pub async fn session(&self) -> Result<Session, CliError> {
        let credentials = resolver::resolve(&self.store).await?;
        let platform = self
            .connector
            .connect(&credentials.token, &credentials.api_host)?;
        Ok(Session {
            credentials,
            platform,
        })
    }

    /// Connect with a token that has not been stored yet
    pub fn connect_with(
        &self,
        token: &str,
        api_host: &str,
    ) -> Result<Arc<dyn PlatformPort>, CliError> {
        self.connector
            .connect(&SecretString::from(token.to_string()), api_host)
    }
}

/// An authenticated connection to the user's project
pub struct Session {
    pub credentials: Credentials,
    pub platform: Arc<dyn PlatformPort>,
}

impl Session {
    pub fn project_id(&self) -> &str {
        &self.credentials.project_id
    }
}
