//! Persisted credential store configuration.

use serde::{Deserialize, Serialize};

/// Credential store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Store provider: `"file"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Path of the credential file for the `file` provider.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            path: default_path(),
        }
    }
}

fn default_provider() -> String {
    "file".to_string()
}

fn default_path() -> String {
    "data/credentials.json".to_string()
}
