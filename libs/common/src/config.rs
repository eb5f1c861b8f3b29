//! Client configuration
//!
//! Settings are layered: built-in defaults, then an optional `lifeblood`
//! config file in the working directory, then `LIFEBLOOD_*` environment
//! variables.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::ConfigError;

/// Configuration for the API client and the session store
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// File holding the persisted session
    pub storage_path: String,
    /// Destination after logout or when no login redirect is pending
    pub home_path: String,
    /// Login page used by the redirect flow
    pub login_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 30,
            storage_path: ".lifeblood/session.json".to_string(),
            home_path: "/index.html".to_string(),
            login_path: "/login.html".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load the configuration
    ///
    /// # Environment Variables
    /// - `LIFEBLOOD_BASE_URL`: backend base URL (default: "http://localhost:5000")
    /// - `LIFEBLOOD_REQUEST_TIMEOUT_SECS`: request timeout (default: 30)
    /// - `LIFEBLOOD_STORAGE_PATH`: session file (default: ".lifeblood/session.json")
    /// - `LIFEBLOOD_HOME_PATH`: home view (default: "/index.html")
    /// - `LIFEBLOOD_LOGIN_PATH`: login view (default: "/login.html")
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .set_default("storage_path", defaults.storage_path)?
            .set_default("home_path", defaults.home_path)?
            .set_default("login_path", defaults.login_path)?
            .add_source(File::with_name("lifeblood").required(false))
            .add_source(Environment::with_prefix("LIFEBLOOD").try_parsing(true))
            .build()?;

        let mut config: ClientConfig = settings.try_deserialize()?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(config)
    }
}
