//! Opening URLs in the user's default browser.

use crate::error::AuthError;
use async_trait::async_trait;
use tracing::debug;

/// Opens URLs outside the application.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn open_external(&self, url: &str) -> Result<(), AuthError>;
}

/// Launches the platform default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

#[async_trait]
impl BrowserLauncher for SystemBrowser {
    async fn open_external(&self, url: &str) -> Result<(), AuthError> {
        debug!("Opening browser");
        let url = url.to_string();
        // open::that may block until the launcher process returns
        tokio::task::spawn_blocking(move || open::that(url))
            .await
            .map_err(|e| AuthError::BrowserLaunchFailed(e.to_string()))?
            .map_err(|e| AuthError::BrowserLaunchFailed(e.to_string()))
    }
}
