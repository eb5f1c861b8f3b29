//! Authentication state for the Lifeblood client
//!
//! The session (bearer token plus cached user profile) is persisted in a
//! key-value store and shared with the HTTP client as its token source.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use api::{HttpClient, LoginCredentials};
//! use auth::{NoopNavigator, PersistedSession, SessionStore};
//! use common::{ClientConfig, FileStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::load()?;
//!     let session = PersistedSession::new(Arc::new(FileStore::open(&config.storage_path)?));
//!     let http = HttpClient::new(&config, Arc::new(session.clone()))?;
//!     let store = SessionStore::new(http, session, Arc::new(NoopNavigator), &config);
//!
//!     let credentials = LoginCredentials {
//!         email: "ama@example.com".to_string(),
//!         password: "secret".to_string(),
//!     };
//!     store.login(&credentials).await?;
//!     println!("{:?}", store.status());
//!     Ok(())
//! }
//! ```

pub mod navigation;
pub mod persisted;
pub mod redirect;
pub mod session;

pub use navigation::{Navigator, NoopNavigator};
pub use persisted::PersistedSession;
pub use redirect::LoginRedirect;
pub use session::{AuthStatus, SessionStore};
