//! Contract of the identity library the orchestrator delegates to.
//!
//! PKCE, token exchange, token cache persistence and silent refresh all live
//! behind [`IdentityClient`]; this crate only decides which path to take.

pub mod account;
pub mod secure;
pub mod token;

pub use account::{Account, IdTokenClaims};
pub use secure::SecureString;
pub use token::{format_duration, InteractiveRequest, TokenRequest, TokenResponse};

use crate::browser::BrowserLauncher;
use crate::error::AuthError;
use async_trait::async_trait;

/// A public client application registered with the identity provider.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Acquire a token from the cached session of `request.account`.
    ///
    /// Fails with [`AuthError::InteractionRequired`] when the cache cannot
    /// satisfy the request without the user.
    async fn acquire_token_silent(&self, request: &TokenRequest)
        -> Result<TokenResponse, AuthError>;

    /// Acquire a token through the browser, using `browser` to open the
    /// authorization URL.
    async fn acquire_token_interactive(
        &self,
        request: InteractiveRequest,
        browser: &dyn BrowserLauncher,
    ) -> Result<TokenResponse, AuthError>;

    /// The account cache backing silent acquisition.
    fn token_cache(&self) -> &dyn TokenCache;
}

/// Accounts known to the identity library.
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// All cached accounts, in the cache's enumeration order.
    async fn get_all_accounts(&self) -> Result<Vec<Account>, AuthError>;

    /// Remove an account and its tokens.
    async fn remove_account(&self, account: &Account) -> Result<(), AuthError>;
}
