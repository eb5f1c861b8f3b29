//! Navigation collaborator
//!
//! Logout and the login-redirect flow end by sending the user somewhere; the
//! front end decides what "navigating" means.

use tracing::debug;

/// Receiver of navigation requests
pub trait Navigator: Send + Sync {
    /// Move the user to `path`
    fn navigate(&self, path: &str);
}

/// Navigator that only logs the destination
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, path: &str) {
        debug!("Navigation to {} ignored", path);
    }
}
