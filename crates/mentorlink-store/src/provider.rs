//! Credential vault that dispatches to the configured store provider.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use mentorlink_core::config::credentials::CredentialsConfig;
use mentorlink_core::error::AppError;
use mentorlink_core::result::AppResult;

use crate::keys;

/// Key-value persistence for the small set of client credentials.
///
/// Implementations must make each operation atomic with respect to the
/// backing medium: a reader never observes a half-written value.
#[async_trait]
pub trait CredentialStore: Send + Sync + fmt::Debug {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove the value stored under `key`, if any.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Remove every stored value.
    async fn clear(&self) -> AppResult<()>;
}

/// Typed facade over the configured [`CredentialStore`] provider.
///
/// All session code goes through this vault; the fixed keys in
/// [`crate::keys`] never appear outside this crate.
#[derive(Debug, Clone)]
pub struct CredentialVault {
    /// The inner store provider.
    inner: Arc<dyn CredentialStore>,
}

impl CredentialVault {
    /// Create a vault from configuration.
    pub fn new(config: &CredentialsConfig) -> AppResult<Self> {
        let inner: Arc<dyn CredentialStore> = match config.provider.as_str() {
            "file" => {
                info!(path = %config.path, "Initializing file credential store");
                Arc::new(crate::file::FileCredentialStore::new(&config.path))
            }
            "memory" => {
                info!("Initializing in-memory credential store");
                Arc::new(crate::memory::MemoryCredentialStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown credential store provider: '{other}'. Supported: file, memory"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a vault from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn CredentialStore>) -> Self {
        Self { inner: provider }
    }

    /// Read the persisted bearer token.
    pub async fn token(&self) -> AppResult<Option<String>> {
        self.inner.get(keys::TOKEN).await
    }

    /// Persist the bearer token.
    pub async fn set_token(&self, token: &str) -> AppResult<()> {
        self.inner.set(keys::TOKEN, token).await
    }

    /// Read the cached profile blob.
    pub async fn cached_profile(&self) -> AppResult<Option<String>> {
        self.inner.get(keys::CACHED_PROFILE).await
    }

    /// Persist the cached profile blob.
    pub async fn set_cached_profile(&self, profile_json: &str) -> AppResult<()> {
        self.inner.set(keys::CACHED_PROFILE, profile_json).await
    }

    /// Remove the token and cached profile together.
    pub async fn clear(&self) -> AppResult<()> {
        self.inner.clear().await
    }
}
