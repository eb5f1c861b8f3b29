//! Authentication session management
//!
//! [`SessionStore`] logs users in and out against the backend and keeps the
//! persisted session in step. Failures of the auth calls are logged with
//! their cause and surfaced as [`ClientError::Auth`] with a generic message.

use std::sync::Arc;

use api::{ClientError, ClientResult, HttpClient, User};
use common::ClientConfig;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::navigation::Navigator;
use crate::persisted::PersistedSession;

const REGISTER: &str = "/api/auth/register";
const LOGIN: &str = "/api/auth/login";
const ME: &str = "/api/auth/me";
const FORGOT_PASSWORD: &str = "/api/auth/forgot-password";

const REGISTER_FAILED: &str = "Registration failed. Please try again later.";
const LOGIN_FAILED: &str = "Login failed. Please check your credentials and try again.";
const FETCH_USER_FAILED: &str = "Failed to fetch current user. Please try again later.";
const FORGOT_PASSWORD_FAILED: &str =
    "Failed to send password reset email. Please try again later.";

/// Name shown for a signed-in user whose profile has no name
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// What the front end shows for the current session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub display_name: Option<String>,
}

/// Session manager for the signed-in user
#[derive(Clone)]
pub struct SessionStore {
    http: HttpClient,
    session: PersistedSession,
    navigator: Arc<dyn Navigator>,
    home_path: String,
}

impl SessionStore {
    /// Create a new session store
    pub fn new(
        http: HttpClient,
        session: PersistedSession,
        navigator: Arc<dyn Navigator>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            http,
            session,
            navigator,
            home_path: config.home_path.clone(),
        }
    }

    /// Register a new user
    pub async fn register<B>(&self, user_data: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.authenticate(REGISTER, user_data)
            .await
            .map_err(|e| {
                error!("Error during registration: {}", e);
                ClientError::Auth(REGISTER_FAILED.to_string())
            })
    }

    /// Login user
    pub async fn login<B>(&self, credentials: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.authenticate(LOGIN, credentials).await.map_err(|e| {
            error!("Error during login: {}", e);
            ClientError::Auth(LOGIN_FAILED.to_string())
        })
    }

    async fn authenticate<B>(&self, path: &str, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let response = self.http.post(path, body).await?;

        if let Some(token) = response.get("token").and_then(Value::as_str) {
            match response.get("user") {
                Some(user) if user.is_object() => {
                    self.session.save(token, user)?;
                    info!("Session started");
                }
                _ => warn!("Auth response carries a token but no user; session not saved"),
            }
        }

        Ok(response)
    }

    /// Logout user
    ///
    /// Purely local. A storage failure while clearing is logged and the user
    /// is still sent home.
    pub fn logout(&self) {
        if let Err(e) = self.session.clear() {
            error!("Failed to clear session: {}", e);
        }

        info!("Session ended");
        self.navigator.navigate(&self.home_path);
    }

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Cached user, without a network call
    pub fn get_current_user(&self) -> Option<User> {
        self.session.user()
    }

    /// Refresh the cached user from the backend
    ///
    /// Returns `None` without a network call when nobody is signed in. An
    /// unauthorized response ends the session.
    pub async fn fetch_current_user(&self) -> ClientResult<Option<User>> {
        if !self.is_authenticated() {
            return Ok(None);
        }

        match self.try_fetch_current_user().await {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                error!("Error fetching current user: {}", e);
                if e.is_unauthorized() {
                    self.logout();
                }
                Err(ClientError::Auth(FETCH_USER_FAILED.to_string()))
            }
        }
    }

    async fn try_fetch_current_user(&self) -> ClientResult<User> {
        let response = self.http.get(ME).await?;
        let raw = response.get("user").cloned().unwrap_or(Value::Null);
        let user: User = serde_json::from_value(raw.clone())?;

        self.session.replace_user(&raw)?;
        Ok(user)
    }

    /// Request a password reset email
    pub async fn forgot_password(&self, email: &str) -> ClientResult<Value> {
        self.http
            .post(FORGOT_PASSWORD, &json!({ "email": email }))
            .await
            .map_err(|e| {
                error!("Error during password reset request: {}", e);
                ClientError::Auth(FORGOT_PASSWORD_FAILED.to_string())
            })
    }

    /// Authentication state as displayed by the front end
    pub fn status(&self) -> AuthStatus {
        if !self.is_authenticated() {
            return AuthStatus {
                authenticated: false,
                display_name: None,
            };
        }

        let display_name = self.get_current_user().map(|user| {
            user.name()
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_DISPLAY_NAME)
                .to_string()
        });

        AuthStatus {
            authenticated: true,
            display_name,
        }
    }

    /// Underlying persisted session
    pub fn session(&self) -> &PersistedSession {
        &self.session
    }
}
