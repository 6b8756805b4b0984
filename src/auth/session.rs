//! The signed-in session owned by an [`AuthProvider`](super::provider::AuthProvider).

use crate::identity::Account;
use tokio::sync::Mutex;

/// Holds at most one signed-in account.
///
/// The lock is only held for the copy in or out, never across a call into
/// the identity library.
#[derive(Debug, Default)]
pub struct Session {
    account: Mutex<Option<Account>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current account.
    pub async fn current(&self) -> Option<Account> {
        self.account.lock().await.clone()
    }

    /// Replace the current account.
    pub async fn set(&self, account: Option<Account>) {
        *self.account.lock().await = account;
    }

    pub async fn clear(&self) {
        self.set(None).await;
    }
}
