//! Microsoft Graph API client for fetching the signed-in user's profile.

use crate::auth::AuthProvider;
use crate::config::ProtectedResource;
use crate::error::{ApiError, AppError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// HTTP request timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// HTTP connection timeout.
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for one Graph endpoint protected by the configured scopes.
pub struct GraphClient {
    http_client: reqwest::Client,
    resource: ProtectedResource,
}

impl GraphClient {
    /// Create a Graph client for a protected resource (usually `graph_me`).
    pub fn new(resource: &ProtectedResource) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            resource: resource.clone(),
        })
    }

    /// Fetch the user's profile with an access token for the resource scopes.
    pub async fn get_user_profile(&self, access_token: &str) -> Result<UserProfile, ApiError> {
        let response = self
            .http_client
            .get(&self.resource.endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ApiError::GraphRequestFailed(e.to_string()))?;

        match response.status().as_u16() {
            200 => {
                let profile: UserProfile = response
                    .json()
                    .await
                    .map_err(|e| ApiError::ParseFailed(e.to_string()))?;
                Ok(profile)
            }
            401 => Err(ApiError::Unauthorized),
            403 => Err(ApiError::Forbidden),
            429 => Err(ApiError::RateLimited),
            // Don't expose raw API error details - just log status code
            status => Err(ApiError::GraphRequestFailed(format!("HTTP {}", status))),
        }
    }

    /// Acquire a token through `provider` and fetch the profile.
    ///
    /// Returns `Ok(None)` when no token could be obtained.
    pub async fn fetch_profile(
        &self,
        provider: &AuthProvider,
    ) -> Result<Option<UserProfile>, AppError> {
        let Some(token) = provider.acquire_for(&self.resource).await? else {
            debug!("No access token available, skipping profile request");
            return Ok(None);
        };

        let profile = self.get_user_profile(token.access_token.as_str()).await?;
        Ok(Some(profile))
    }
}

/// User profile from Microsoft Graph /me endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique identifier for the user.
    pub id: String,

    /// User's display name.
    pub display_name: Option<String>,

    /// User's given (first) name.
    pub given_name: Option<String>,

    /// User's surname (last name).
    pub surname: Option<String>,

    /// User's email address.
    pub mail: Option<String>,

    /// User Principal Name (typically email-like format).
    pub user_principal_name: Option<String>,

    /// User's job title.
    pub job_title: Option<String>,

    /// User's office location.
    pub office_location: Option<String>,
}

impl UserProfile {
    /// Get the best available display name.
    pub fn display_name_or_upn(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.user_principal_name.clone())
            .unwrap_or_else(|| "Unknown User".to_string())
    }

    /// Get the best available email.
    pub fn email(&self) -> String {
        self.mail
            .clone()
            .or_else(|| self.user_principal_name.clone())
            .unwrap_or_else(|| "No email".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::BrowserLauncher;
    use crate::error::AuthError;
    use crate::identity::{
        Account, IdentityClient, InteractiveRequest, SecureString, TokenCache, TokenRequest,
        TokenResponse,
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Identity client with one cached account whose silent path either
    /// returns `token` or fails.
    struct CachedSession {
        token: Option<&'static str>,
    }

    fn cached_account() -> Account {
        Account {
            home_account_id: "oid.tid".into(),
            environment: "login.microsoftonline.com".into(),
            tenant_id: "tid".into(),
            username: "adele@contoso.com".into(),
            local_account_id: "oid".into(),
            name: None,
            id_token_claims: None,
        }
    }

    #[async_trait]
    impl IdentityClient for CachedSession {
        async fn acquire_token_silent(
            &self,
            _request: &TokenRequest,
        ) -> Result<TokenResponse, AuthError> {
            match self.token {
                Some(token) => Ok(TokenResponse {
                    access_token: SecureString::from(token),
                    token_type: "Bearer".into(),
                    account: cached_account(),
                    scopes: vec!["User.Read".into()],
                    expires_on: Utc::now() + chrono::Duration::hours(1),
                }),
                None => Err(AuthError::TokenAcquisitionFailed("offline".into())),
            }
        }

        async fn acquire_token_interactive(
            &self,
            _request: InteractiveRequest,
            _browser: &dyn BrowserLauncher,
        ) -> Result<TokenResponse, AuthError> {
            Err(AuthError::UserCancelled)
        }

        fn token_cache(&self) -> &dyn TokenCache {
            self
        }
    }

    #[async_trait]
    impl TokenCache for CachedSession {
        async fn get_all_accounts(&self) -> Result<Vec<Account>, AuthError> {
            Ok(vec![cached_account()])
        }

        async fn remove_account(&self, _account: &Account) -> Result<(), AuthError> {
            Ok(())
        }
    }

    struct NoBrowser;

    #[async_trait]
    impl BrowserLauncher for NoBrowser {
        async fn open_external(&self, _url: &str) -> Result<(), AuthError> {
            Err(AuthError::BrowserLaunchFailed("headless".into()))
        }
    }

    fn resource(server: &MockServer) -> ProtectedResource {
        ProtectedResource {
            endpoint: format!("{}/v1.0/me", server.uri()),
            scopes: vec!["User.Read".into()],
        }
    }

    fn provider(token: Option<&'static str>) -> AuthProvider {
        AuthProvider::new(
            "https://login.microsoftonline.com/common",
            Arc::new(CachedSession { token }),
            Arc::new(NoBrowser),
        )
    }

    #[tokio::test]
    async fn test_get_user_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/me"))
            .and(header("authorization", "Bearer token-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "123",
                "displayName": "Adele Vance",
                "mail": null,
                "userPrincipalName": "adele@contoso.com",
                "jobTitle": "Retail Manager"
            })))
            .mount(&server)
            .await;

        let client = GraphClient::new(&resource(&server)).unwrap();
        let profile = client.get_user_profile("token-123").await.unwrap();

        assert_eq!(profile.display_name_or_upn(), "Adele Vance");
        assert_eq!(profile.email(), "adele@contoso.com");
        assert_eq!(profile.job_title.as_deref(), Some("Retail Manager"));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let server = MockServer::start().await;
        let client = GraphClient::new(&resource(&server)).unwrap();

        for status in [401u16, 403, 429, 500] {
            server.reset().await;
            Mock::given(method("GET"))
                .and(path("/v1.0/me"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let err = client.get_user_profile("token").await.unwrap_err();
            let mapped = match status {
                401 => matches!(err, ApiError::Unauthorized),
                403 => matches!(err, ApiError::Forbidden),
                429 => matches!(err, ApiError::RateLimited),
                _ => matches!(&err, ApiError::GraphRequestFailed(msg) if msg == "HTTP 500"),
            };
            assert!(mapped, "unexpected error for HTTP {}: {:?}", status, err);
        }
    }

    #[tokio::test]
    async fn test_fetch_profile_uses_acquired_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/me"))
            .and(header("authorization", "Bearer cached-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "123",
                "displayName": null,
                "userPrincipalName": "adele@contoso.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphClient::new(&resource(&server)).unwrap();
        let profile = client
            .fetch_profile(&provider(Some("cached-token")))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(profile.display_name_or_upn(), "adele@contoso.com");
    }

    #[tokio::test]
    async fn test_fetch_profile_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = GraphClient::new(&resource(&server)).unwrap();
        let profile = client.fetch_profile(&provider(None)).await.unwrap();

        assert!(profile.is_none());
    }

    #[test]
    fn test_user_profile_fallback() {
        let profile = UserProfile {
            id: "123".into(),
            display_name: None,
            given_name: None,
            surname: None,
            mail: None,
            user_principal_name: None,
            job_title: None,
            office_location: None,
        };

        assert_eq!(profile.display_name_or_upn(), "Unknown User");
        assert_eq!(profile.email(), "No email");
    }
}
