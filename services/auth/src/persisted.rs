//! Persisted session state
//!
//! The bearer token and the cached user profile live in a [`KeyValueStore`]
//! under fixed keys. They are always written and removed as a pair; only
//! this crate can mutate them.

use std::sync::Arc;

use api::{ClientResult, TokenSource, User};
use common::KeyValueStore;
use serde_json::Value;
use tracing::{debug, warn};

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON-serialized user profile
pub const USER_KEY: &str = "user";
/// Key holding the path to restore after login
pub const LOGIN_REDIRECT_KEY: &str = "loginRedirect";

/// Token and cached user, backed by durable key-value storage
#[derive(Clone)]
pub struct PersistedSession {
    store: Arc<dyn KeyValueStore>,
}

impl PersistedSession {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read a key, treating storage failures as absence
    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read {} from session storage: {}", key, e);
                None
            }
        }
    }

    /// Current bearer token
    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    /// Whether a token is stored, regardless of the cached user
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Cached user, or `None` if absent or unparsable
    pub fn user(&self) -> Option<User> {
        let raw = self.read(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Cached user is not valid: {}", e);
                None
            }
        }
    }

    /// Store a new token and user together
    pub(crate) fn save(&self, token: &str, user: &Value) -> ClientResult<()> {
        let user = serde_json::to_string(user)?;
        self.store
            .set_all(&[(TOKEN_KEY, token), (USER_KEY, user.as_str())])?;

        debug!("Session saved");
        Ok(())
    }

    /// Overwrite the cached user of an existing session
    ///
    /// Returns `false` without writing when the session has ended meanwhile.
    pub(crate) fn replace_user(&self, user: &Value) -> ClientResult<bool> {
        if !self.store.contains(TOKEN_KEY)? {
            warn!("Session ended before the user profile arrived; discarding it");
            return Ok(false);
        }

        self.store.set(USER_KEY, &serde_json::to_string(user)?)?;
        Ok(true)
    }

    /// Remove token and user together
    pub(crate) fn clear(&self) -> ClientResult<()> {
        self.store.remove_all(&[TOKEN_KEY, USER_KEY])?;
        debug!("Session cleared");
        Ok(())
    }

    pub(crate) fn set_login_redirect(&self, path: &str) -> ClientResult<()> {
        self.store.set(LOGIN_REDIRECT_KEY, path)?;
        Ok(())
    }

    /// Read and remove the pending login redirect
    pub(crate) fn take_login_redirect(&self) -> ClientResult<Option<String>> {
        let path = self.store.get(LOGIN_REDIRECT_KEY)?;
        if path.is_some() {
            self.store.remove(LOGIN_REDIRECT_KEY)?;
        }
        Ok(path)
    }
}

impl TokenSource for PersistedSession {
    fn token(&self) -> Option<String> {
        PersistedSession::token(self)
    }
}
