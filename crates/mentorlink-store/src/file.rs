//! JSON-file credential store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use mentorlink_core::error::AppError;
use mentorlink_core::result::AppResult;

use crate::provider::CredentialStore;

/// Credential store backed by a single JSON document on disk.
///
/// Writes go to a sibling temp file first and are renamed over the
/// document, so an interrupted write leaves the previous document intact.
/// An internal lock serializes read-modify-write cycles.
#[derive(Debug)]
pub struct FileCredentialStore {
    /// Path of the JSON document.
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Create a store over the given file path. The file is created on
    /// the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Load the document, treating a missing file as an empty map.
    async fn load(&self) -> AppResult<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::storage(format!(
                    "Credential file '{}' is not valid JSON: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to read credential file '{}': {e}",
                self.path.display()
            ))),
        }
    }

    /// Write the document via temp-file-then-rename.
    async fn persist(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::storage(format!(
                        "Failed to create credential directory '{}': {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw.as_bytes()).await.map_err(|e| {
            AppError::storage(format!("Failed to write '{}': {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to replace credential file '{}': {e}",
                self.path.display()
            ))
        })?;

        debug!(path = %self.path.display(), "Credential file updated");
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self.load().await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to remove credential file '{}': {e}",
                self.path.display()
            ))),
        }
    }
}
