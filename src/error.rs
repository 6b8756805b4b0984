//! Error types for azauth.
//!
//! Uses `thiserror` for library-style errors with automatic `Display` and `Error` implementations.

use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Errors raised by the identity library and browser launcher.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The cached session cannot satisfy the request without user interaction
    /// (consent missing, session expired, MFA required).
    #[error("Interaction required: {0}")]
    InteractionRequired(String),

    #[error("OAuth2 authorization failed: {0}")]
    OAuthFailed(String),

    #[error("Token acquisition failed: {0}")]
    TokenAcquisitionFailed(String),

    #[error("User cancelled authentication")]
    UserCancelled,

    #[error("OAuth callback timeout")]
    CallbackTimeout,

    #[error("Token cache error: {0}")]
    CacheFailed(String),

    #[error("Failed to open browser: {0}")]
    BrowserLaunchFailed(String),
}

impl AuthError {
    /// Returns true if the error asks for an interactive sign-in.
    pub fn is_interaction_required(&self) -> bool {
        matches!(self, Self::InteractionRequired(_))
    }
}

/// API-related errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Graph API request failed: {0}")]
    GraphRequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseFailed(String),

    #[error("Unauthorized (401): Token may be expired")]
    Unauthorized,

    #[error("Forbidden (403): Insufficient permissions")]
    Forbidden,

    #[error("Rate limited (429): Too many requests")]
    RateLimited,
}

impl AppError {
    /// Returns a user-friendly message for display in the UI.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Auth(AuthError::InteractionRequired(_)) => "Please sign in to continue.",
            Self::Auth(AuthError::OAuthFailed(_)) => "Sign-in failed. Please try again.",
            Self::Auth(AuthError::TokenAcquisitionFailed(_)) => {
                "Could not get an access token. Please sign in again."
            }
            Self::Auth(AuthError::CallbackTimeout) => "Sign-in timed out. Please try again.",
            Self::Auth(AuthError::UserCancelled) => "Sign-in was cancelled.",
            Self::Auth(AuthError::BrowserLaunchFailed(_)) => {
                "Could not open the browser for sign-in."
            }
            Self::Api(ApiError::Unauthorized) => "Authentication expired. Sign in again.",
            Self::Api(ApiError::Forbidden) => "Insufficient permissions for this operation.",
            Self::Api(ApiError::RateLimited) => "Too many requests. Please wait a moment.",
            Self::Network(_) => "Network error. Check your connection.",
            _ => "An error occurred. Please try again.",
        }
    }

    /// Returns true if this error should trigger a sign-out.
    pub fn requires_sign_out(&self) -> bool {
        matches!(
            self,
            Self::Auth(AuthError::InteractionRequired(_)) | Self::Api(ApiError::Unauthorized)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = AppError::Auth(AuthError::OAuthFailed("test".into()));
        assert_eq!(err.user_message(), "Sign-in failed. Please try again.");

        let err = AppError::Auth(AuthError::CacheFailed("io".into()));
        assert_eq!(err.user_message(), "An error occurred. Please try again.");
    }

    #[test]
    fn test_requires_sign_out() {
        let err = AppError::Api(ApiError::Unauthorized);
        assert!(err.requires_sign_out());

        let err = AppError::Api(ApiError::Forbidden);
        assert!(!err.requires_sign_out());
    }

    #[test]
    fn test_interaction_required() {
        assert!(AuthError::InteractionRequired("consent".into()).is_interaction_required());
        assert!(!AuthError::UserCancelled.is_interaction_required());
    }
}
