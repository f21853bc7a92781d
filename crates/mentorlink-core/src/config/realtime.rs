//! Realtime channel configuration.

use serde::{Deserialize, Serialize};

/// Realtime (WebSocket) channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// WebSocket URL of the realtime endpoint.
    #[serde(default = "default_url")]
    pub url: String,
    /// Initial reconnect delay in milliseconds.
    #[serde(default = "default_reconnect_initial")]
    pub reconnect_initial_ms: u64,
    /// Maximum reconnect delay in milliseconds.
    #[serde(default = "default_reconnect_cap")]
    pub reconnect_cap_ms: u64,
    /// Maximum random jitter added to each reconnect delay, in milliseconds.
    #[serde(default = "default_reconnect_jitter")]
    pub reconnect_jitter_ms: u64,
    /// Buffer size of the inbound event broadcast channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            reconnect_initial_ms: default_reconnect_initial(),
            reconnect_cap_ms: default_reconnect_cap(),
            reconnect_jitter_ms: default_reconnect_jitter(),
            event_buffer_size: default_event_buffer(),
        }
    }
}

fn default_url() -> String {
    "ws://localhost:4000/ws".to_string()
}

fn default_reconnect_initial() -> u64 {
    1_000
}

fn default_reconnect_cap() -> u64 {
    10_000
}

fn default_reconnect_jitter() -> u64 {
    300
}

fn default_event_buffer() -> usize {
    256
}
