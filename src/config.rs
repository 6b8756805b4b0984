//! Configuration loading and management.
//!
//! Loads configuration from embedded config.toml with environment variable overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use url::Url;

/// Embedded configuration file content.
const CONFIG_TOML: &str = include_str!("../config.toml");

/// Client id shipped in config.toml, rejected by validation.
const PLACEHOLDER_CLIENT_ID: &str = "Enter_the_Application_Id_Here";

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub protected_resources: ProtectedResources,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub client_id: String,
    pub authority_host: String,
    #[serde(default)]
    pub tenant_id: String,
}

/// Downstream APIs the application calls with an access token.
#[derive(Debug, Clone, Deserialize)]
pub struct ProtectedResources {
    pub graph_me: ProtectedResource,
}

/// A protected endpoint and the scopes its access token must carry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProtectedResource {
    pub endpoint: String,
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Whether usernames and other personal data may appear in log output.
    #[serde(default)]
    pub pii_logging_enabled: bool,
}

impl Config {
    /// Load configuration from embedded config.toml with environment variable overrides.
    ///
    /// A `.env` file in the working directory is read first, if present.
    pub fn load() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            // .env file is optional
            if !e.not_found() {
                tracing::warn!("Failed to load .env file: {}", e);
            }
        }

        let mut config = Self::embedded()?;
        config.apply_overrides(|key| env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parse the embedded defaults without overrides or validation.
    pub fn embedded() -> Result<Self> {
        toml::from_str(CONFIG_TOML).context("Failed to parse embedded config.toml")
    }

    /// Apply overrides from a variable lookup (the process environment in `load`).
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(client_id) = var("AZURE_CLIENT_ID") {
            self.auth.client_id = client_id;
        }

        if let Some(tenant) = var("AZURE_TENANT_ID") {
            self.auth.tenant_id = tenant;
        }

        if let Some(host) = var("AZURE_AUTHORITY_HOST") {
            self.auth.authority_host = host;
        }

        if let Some(log_level) = var("RUST_LOG") {
            self.logging.level = log_level;
        }
    }

    /// Validate that required configuration is present.
    fn validate(&self) -> Result<()> {
        if self.auth.client_id.is_empty() || self.auth.client_id == PLACEHOLDER_CLIENT_ID {
            anyhow::bail!(
                "Azure AD client_id not configured. Set AZURE_CLIENT_ID environment variable \
                 or update config.toml"
            );
        }

        let authority = self.authority();
        let parsed = Url::parse(&authority)
            .with_context(|| format!("Invalid authority URL: {}", authority))?;
        if !matches!(parsed.scheme(), "https" | "http") {
            anyhow::bail!("Authority must be an http(s) URL, got {}", authority);
        }

        Url::parse(&self.protected_resources.graph_me.endpoint).with_context(|| {
            format!(
                "Invalid graph_me endpoint: {}",
                self.protected_resources.graph_me.endpoint
            )
        })?;

        Ok(())
    }

    /// The authority URL: authority host followed by the tenant, without a trailing slash.
    pub fn authority(&self) -> String {
        let host = self.auth.authority_host.trim_end_matches('/');
        let tenant = self.auth.tenant_id.trim_matches('/');
        if tenant.is_empty() {
            host.to_string()
        } else {
            format!("{}/{}", host, tenant)
        }
    }
}
