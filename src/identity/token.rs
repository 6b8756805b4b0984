//! Token requests and responses exchanged with the identity library.

use super::account::Account;
use super::secure::SecureString;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// A request for an access token carrying the given scopes.
#[derive(Debug, Clone)]
pub struct TokenRequest {
    pub scopes: Vec<String>,
    /// Account to acquire for. Filled in by the orchestrator before a silent attempt.
    pub account: Option<Account>,
    /// Ties together log lines from one acquisition.
    pub correlation_id: Uuid,
}

impl TokenRequest {
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scopes: scopes.into_iter().map(Into::into).collect(),
            account: None,
            correlation_id: Uuid::new_v4(),
        }
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.account = Some(account);
        self
    }
}

/// A token request for the browser-driven flow.
#[derive(Debug, Clone)]
pub struct InteractiveRequest {
    pub request: TokenRequest,
    /// Shown on the redirect page after a successful sign-in.
    pub success_template: String,
    /// Shown on the redirect page after a failed sign-in.
    pub error_template: String,
}

/// A successfully acquired token.
#[derive(Debug, Clone)]
pub struct TokenResponse {
    pub access_token: SecureString,
    pub token_type: String,
    pub account: Account,
    /// Scopes actually granted, which may be a superset of those requested.
    pub scopes: Vec<String>,
    pub expires_on: DateTime<Utc>,
}

impl TokenResponse {
    /// Remaining lifetime, or `None` if the token has expired.
    pub fn expires_in(&self) -> Option<Duration> {
        let now = Utc::now();
        if self.expires_on > now {
            Some(self.expires_on - now)
        } else {
            None
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_in().is_none()
    }

    /// Remaining lifetime for display; an expired token reads as "< 1 min".
    pub fn expiry_label(&self) -> String {
        format_duration(self.expires_in().unwrap_or_else(Duration::zero))
    }
}

/// Format duration as human-readable string (e.g., "45 min", "1 hour").
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes();

    if total_minutes < 1 {
        "< 1 min".to_string()
    } else if total_minutes < 60 {
        format!("{} min", total_minutes)
    } else {
        let hours = total_minutes / 60;
        let mins = total_minutes % 60;
        if mins == 0 {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}
