//! Application state built once at start-up

use std::sync::Arc;

use anyhow::Result;
use api::{Api, HttpClient};
use auth::{LoginRedirect, Navigator, PersistedSession, SessionStore};
use common::{ClientConfig, FileStore};
use tracing::info;

/// Navigator for the terminal: there is no view to switch, so it reports
/// the destination
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, path: &str) {
        info!("Navigate to {}", path);
    }
}

/// Application state shared across command handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub sessions: SessionStore,
    pub redirect: LoginRedirect,
    pub api: Api,
}

impl AppState {
    /// Wire the session storage, HTTP client and resource clients together
    pub fn new(config: ClientConfig) -> Result<Self> {
        let store = FileStore::open(&config.storage_path)?;
        let session = PersistedSession::new(Arc::new(store));
        let navigator: Arc<dyn Navigator> = Arc::new(ConsoleNavigator);

        let http = HttpClient::new(&config, Arc::new(session.clone()))?;
        let sessions = SessionStore::new(http.clone(), session.clone(), navigator.clone(), &config);
        let redirect = LoginRedirect::new(session, navigator, &config);
        let api = Api::new(http);

        info!("Client initialized for {}", config.base_url);

        Ok(Self {
            config,
            sessions,
            redirect,
            api,
        })
    }
}
