//! Login redirect flow
//!
//! An anonymous user hitting a protected view is sent to the login page with
//! a `redirect` parameter. The login page remembers it under the
//! `loginRedirect` key, and the first navigation after a successful login
//! consumes it.

use std::sync::Arc;

use api::ClientResult;
use common::ClientConfig;
use tracing::{info, warn};
use url::form_urlencoded;

use crate::navigation::Navigator;
use crate::persisted::PersistedSession;

#[derive(Clone)]
pub struct LoginRedirect {
    session: PersistedSession,
    navigator: Arc<dyn Navigator>,
    home_path: String,
    login_path: String,
}

impl LoginRedirect {
    pub fn new(
        session: PersistedSession,
        navigator: Arc<dyn Navigator>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            session,
            navigator,
            home_path: config.home_path.clone(),
            login_path: config.login_path.clone(),
        }
    }

    /// Guard for protected views
    ///
    /// Returns `true` when a session exists. Otherwise sends the user to the
    /// login page carrying `current_path` and returns `false`.
    pub fn require_auth(&self, current_path: &str) -> bool {
        if self.session.is_authenticated() {
            return true;
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("redirect", current_path)
            .finish();
        let destination = format!("{}?{}", self.login_path, query);

        info!("Authentication required for {}", current_path);
        self.navigator.navigate(&destination);
        false
    }

    /// Remember the `redirect` parameter of the login page's query string
    pub fn remember_from_query(&self, query: &str) -> ClientResult<Option<String>> {
        let redirect = form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .find(|(key, _)| key == "redirect")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());

        if let Some(path) = &redirect {
            self.remember(path)?;
        }

        Ok(redirect)
    }

    /// Remember `path` as the destination after the next login
    pub fn remember(&self, path: &str) -> ClientResult<()> {
        self.session.set_login_redirect(path)
    }

    /// Navigate to the remembered path, or home, and return the destination
    pub fn redirect_after_login(&self) -> String {
        let destination = match self.session.take_login_redirect() {
            Ok(Some(path)) => path,
            Ok(None) => self.home_path.clone(),
            Err(e) => {
                warn!("Failed to read login redirect: {}", e);
                self.home_path.clone()
            }
        };

        self.navigator.navigate(&destination);
        destination
    }
}
