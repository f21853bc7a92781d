//! Connection lifecycle: backoff policy and the reconnecting client.

pub mod backoff;
pub mod client;
