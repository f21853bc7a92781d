//! Wire messages for the realtime channel.

pub mod envelope;
pub mod types;
