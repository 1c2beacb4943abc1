use std::path::PathBuf;
use std::sync::Arc;

use poliza_auth::SessionContext;
use poliza_auth::store::FileStore;
use poliza_backend::BackendClient;
use poliza_core::models::user::User;

use crate::config::{self, PolizaConfig};

/// Everything a command runs against: the resolved config, the backend
/// client, and the hydrated session.
pub struct CliState {
    pub config_dir: PathBuf,
    pub config: PolizaConfig,
    pub session: SessionContext<FileStore>,
    backend_url: Option<String>,
}

impl CliState {
    pub fn load(backend_url: Option<String>) -> eyre::Result<Self> {
        let config_dir = config::config_dir()?;
        let store = FileStore::new(config_dir.join("session.json"));
        Self::load_from(config_dir, store, backend_url)
    }

    pub fn load_from(
        config_dir: PathBuf,
        store: FileStore,
        backend_url: Option<String>,
    ) -> eyre::Result<Self> {
        let config = config::load_or_default(&config_dir)?;
        if !config_dir.join("config.json").exists() {
            config::save_config(&config_dir, &config)?;
        }
        let session = SessionContext::hydrate(store, jiff::Timestamp::now());
        Ok(Self {
            config_dir,
            config,
            session,
            backend_url,
        })
    }

    /// A client for the configured backend, authenticated when signed in.
    pub fn backend(&self) -> eyre::Result<BackendClient> {
        let settings = self.config.backend(self.backend_url.as_deref());
        let client = BackendClient::new(&settings)?;
        Ok(match self.session.access_token() {
            Some(token) => client.with_bearer(token),
            None => client,
        })
    }

    pub fn shared_backend(&self) -> eyre::Result<Arc<BackendClient>> {
        Ok(Arc::new(self.backend()?))
    }

    pub fn require_user(&self) -> eyre::Result<&User> {
        self.session.require_token()?;
        self.session
            .user()
            .ok_or_else(|| eyre::eyre!("not signed in"))
    }
}
