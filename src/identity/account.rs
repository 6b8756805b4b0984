//! Signed-in account records as returned by the identity library.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A principal issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Identifier of the account across tenants (`{oid}.{tid}`).
    pub home_account_id: String,

    /// Authority host the account was issued by (e.g. `login.microsoftonline.com`).
    pub environment: String,

    pub tenant_id: String,

    /// Preferred username, usually the UPN.
    pub username: String,

    /// Object id of the account in its tenant.
    pub local_account_id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Claims from the ID token the account was created from.
    #[serde(default)]
    pub id_token_claims: Option<IdTokenClaims>,
}

impl Account {
    /// The `login_hint` claim, if the token carries a non-empty one.
    ///
    /// Azure AD only emits it when the optional `login_hint` claim is
    /// enabled on the app registration.
    pub fn login_hint(&self) -> Option<&str> {
        self.id_token_claims
            .as_ref()
            .and_then(|claims| claims.login_hint.as_deref())
            .filter(|hint| !hint.is_empty())
    }

    /// How the account is named in log output.
    pub fn log_label(&self, pii_enabled: bool) -> String {
        if pii_enabled {
            self.username.clone()
        } else {
            format!("account in tenant {}", self.tenant_id)
        }
    }
}

/// ID token claims. Only `login_hint` is interpreted; the rest are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_hint: Option<String>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl IdTokenClaims {
    pub fn with_login_hint(hint: impl Into<String>) -> Self {
        Self {
            login_hint: Some(hint.into()),
            other: Map::new(),
        }
    }
}
