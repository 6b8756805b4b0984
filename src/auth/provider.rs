//! Token acquisition policy: silent first, interactive as fallback.

use crate::auth::session::Session;
use crate::browser::BrowserLauncher;
use crate::config::{Config, ProtectedResource};
use crate::error::AuthError;
use crate::identity::{
    Account, IdentityClient, InteractiveRequest, TokenRequest, TokenResponse,
};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Shown on the redirect page after a successful interactive sign-in.
pub const SUCCESS_TEMPLATE: &str = "You have succesfully signed in. You can close this window.";
/// Shown on the redirect page after a failed interactive sign-in.
pub const ERROR_TEMPLATE: &str = "Something went wrong, please try signing in again.";

/// Signs the user in and hands out access tokens.
///
/// Results distinguish three outcomes: `Ok(Some(_))` on success, `Ok(None)`
/// when no token could be obtained but the caller may retry, and `Err(_)`
/// when the interactive flow itself failed.
pub struct AuthProvider {
    authority: String,
    pii_logging: bool,
    client: Arc<dyn IdentityClient>,
    browser: Arc<dyn BrowserLauncher>,
    session: Session,
}

impl AuthProvider {
    /// Create a provider for the given authority (e.g.
    /// `https://login.microsoftonline.com/{tenant}`).
    pub fn new(
        authority: impl Into<String>,
        client: Arc<dyn IdentityClient>,
        browser: Arc<dyn BrowserLauncher>,
    ) -> Self {
        Self {
            authority: authority.into(),
            pii_logging: false,
            client,
            browser,
            session: Session::new(),
        }
    }

    /// Create a provider using the configured authority and logging policy.
    pub fn from_config(
        config: &Config,
        client: Arc<dyn IdentityClient>,
        browser: Arc<dyn BrowserLauncher>,
    ) -> Self {
        Self::new(config.authority(), client, browser)
            .with_pii_logging(config.logging.pii_logging_enabled)
    }

    /// Allow usernames in log output.
    pub fn with_pii_logging(mut self, enabled: bool) -> Self {
        self.pii_logging = enabled;
        self
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// The signed-in account, if any.
    pub async fn current_account(&self) -> Option<Account> {
        self.session.current().await
    }

    pub async fn is_signed_in(&self) -> bool {
        self.session.current().await.is_some()
    }

    /// Sign in, consenting only to the scopes the identity library adds by default.
    pub async fn login(&self) -> Result<Option<Account>, AuthError> {
        match self.get_token(TokenRequest::new(Vec::<String>::new())).await? {
            Some(response) => Ok(self.handle_response(Some(&response)).await),
            None => Ok(None),
        }
    }

    /// Sign out the current account.
    ///
    /// When the account carries a `login_hint` claim the provider's logout
    /// page is opened as well. Local state is cleared even if that fails.
    pub async fn logout(&self) {
        let Some(account) = self.session.current().await else {
            debug!("Logout requested with no signed-in account");
            return;
        };

        match account.login_hint() {
            Some(hint) => {
                let url = logout_url(&self.authority, hint);
                if let Err(e) = self.browser.open_external(&url).await {
                    warn!("Failed to open provider logout page: {}", e);
                }
            }
            None => debug!("No login_hint claim, skipping provider sign-out"),
        }

        if let Err(e) = self.client.token_cache().remove_account(&account).await {
            error!("Failed to remove account from token cache: {}", e);
        }

        self.session.clear().await;
        info!("Signed out {}", account.log_label(self.pii_logging));
    }

    /// Acquire a token for the scopes of a configured protected resource.
    pub async fn acquire_for(
        &self,
        resource: &ProtectedResource,
    ) -> Result<Option<TokenResponse>, AuthError> {
        self.get_token(TokenRequest::new(resource.scopes.iter().cloned()))
            .await
    }

    /// Acquire a token, silently if an account is known, interactively otherwise.
    pub async fn get_token(
        &self,
        request: TokenRequest,
    ) -> Result<Option<TokenResponse>, AuthError> {
        let span = info_span!("acquire_token", correlation_id = %request.correlation_id);
        self.resolve_and_acquire(request).instrument(span).await
    }

    async fn resolve_and_acquire(
        &self,
        request: TokenRequest,
    ) -> Result<Option<TokenResponse>, AuthError> {
        let account = match self.session.current().await {
            Some(account) => Some(account),
            None => self.get_account().await,
        };

        let response = match account {
            Some(account) => self.get_token_silent(request.with_account(account)).await?,
            None => {
                debug!("No cached account, acquiring token interactively");
                Some(self.get_token_interactive(request).await?)
            }
        };

        if let Some(response) = &response {
            self.session.set(Some(response.account.clone())).await;
            info!(
                "Token acquired for {}, expires in {}",
                response.account.log_label(self.pii_logging),
                response.expiry_label()
            );
        }

        Ok(response)
    }

    /// Acquire a token from the cached session.
    ///
    /// Falls back to one interactive attempt when the library reports that
    /// interaction is required; any other failure yields `Ok(None)`.
    pub async fn get_token_silent(
        &self,
        request: TokenRequest,
    ) -> Result<Option<TokenResponse>, AuthError> {
        match self.client.acquire_token_silent(&request).await {
            Ok(response) => Ok(Some(response)),
            Err(e) if e.is_interaction_required() => {
                info!("Silent token acquisition failed, acquiring token interactively");
                self.get_token_interactive(request).await.map(Some)
            }
            Err(e) => {
                warn!("Silent token acquisition failed: {}", e);
                Ok(None)
            }
        }
    }

    /// Acquire a token through the browser. Failures are returned as-is.
    pub async fn get_token_interactive(
        &self,
        request: TokenRequest,
    ) -> Result<TokenResponse, AuthError> {
        let request = InteractiveRequest {
            request,
            success_template: SUCCESS_TEMPLATE.to_string(),
            error_template: ERROR_TEMPLATE.to_string(),
        };

        self.client
            .acquire_token_interactive(request, self.browser.as_ref())
            .await
            .map_err(|e| {
                error!("Interactive token acquisition failed: {}", e);
                e
            })
    }

    /// Pick the account to sign in with from the token cache.
    ///
    /// With several cached accounts the first one is used; there is no
    /// account picker.
    pub async fn get_account(&self) -> Option<Account> {
        let accounts = match self.client.token_cache().get_all_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                warn!("Failed to read accounts from token cache: {}", e);
                return None;
            }
        };

        if accounts.len() > 1 {
            warn!(
                "Multiple accounts detected ({}), using the first one",
                accounts.len()
            );
        }

        accounts.into_iter().next()
    }

    /// Adopt the account of a completed acquisition, or look one up in the
    /// cache when there is no response.
    pub async fn handle_response(&self, response: Option<&TokenResponse>) -> Option<Account> {
        let account = match response {
            Some(response) => Some(response.account.clone()),
            None => self.get_account().await,
        };

        self.session.set(account.clone()).await;
        account
    }
}

/// The provider's end-session URL for the given login hint.
pub fn logout_url(authority: &str, login_hint: &str) -> String {
    format!(
        "{}/oauth2/v2.0/logout?logout_hint={}",
        authority.trim_end_matches('/'),
        urlencoding::encode(login_hint)
    )
}
