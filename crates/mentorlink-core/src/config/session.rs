//! Session and token configuration.

use serde::{Deserialize, Serialize};

/// Session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Clock-skew leeway in seconds applied when checking token expiry.
    #[serde(default = "default_leeway")]
    pub expiry_leeway_seconds: u64,
    /// Whether to cache the fetched profile alongside the token.
    #[serde(default = "default_true")]
    pub cache_profile: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_leeway_seconds: default_leeway(),
            cache_profile: default_true(),
        }
    }
}

fn default_leeway() -> u64 {
    5
}

fn default_true() -> bool {
    true
}
