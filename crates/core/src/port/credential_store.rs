// Credential Store Port (Interface)

use crate::domain::Credentials;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session data: {0}")]
    Corrupt(String),
}

/// Persisted key-value storage holding the signed-in session
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Stored session, or `None` when nobody is signed in
    fn load(&self) -> Result<Option<Credentials>, StoreError>;

    fn save(&self, credentials: &Credentials) -> Result<(), StoreError>;

    /// Forget the stored session. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory store (tests and ephemeral sessions)
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: Mutex::new(Some(credentials)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Credentials>> {
        // A poisoned lock still holds valid data
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, StoreError> {
        Ok(self.lock().clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), StoreError> {
        *self.lock() = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.lock() = None;
        Ok(())
    }
}
