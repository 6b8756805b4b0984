//! Azure AD sign-in orchestration.
//!
//! Chooses between silent and interactive token acquisition and tracks the
//! signed-in account.

pub mod provider;
pub mod session;

pub use provider::{logout_url, AuthProvider, ERROR_TEMPLATE, SUCCESS_TEMPLATE};
pub use session::Session;
