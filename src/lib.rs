//! Azure AD sign-in for desktop applications.
//!
//! [`AuthProvider`] decides whether a token request can be served silently
//! from the identity library's cache or needs the browser, and keeps track of
//! the signed-in account. [`GraphClient`] uses the resulting token to call
//! Microsoft Graph.
//!
//! ```ignore
//! use azauth::{AuthProvider, Config, GraphClient, SystemBrowser};
//! use std::sync::Arc;
//!
//! let config = Config::load()?;
//! azauth::logging::init_logging(&config.logging)?;
//!
//! let provider = AuthProvider::from_config(&config, Arc::new(my_client), Arc::new(SystemBrowser));
//! provider.login().await?;
//!
//! let graph = GraphClient::new(&config.protected_resources.graph_me)?;
//! if let Some(profile) = graph.fetch_profile(&provider).await? {
//!     println!("Signed in as {}", profile.display_name_or_upn());
//! }
//! ```

#![deny(clippy::all)]

pub mod auth;
pub mod browser;
pub mod config;
pub mod error;
pub mod graph;
pub mod identity;
pub mod logging;

pub use auth::AuthProvider;
pub use browser::{BrowserLauncher, SystemBrowser};
pub use config::Config;
pub use error::{ApiError, AppError, AuthError};
pub use graph::{GraphClient, UserProfile};
pub use identity::{Account, IdentityClient, TokenCache, TokenRequest, TokenResponse};
