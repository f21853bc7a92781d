//! Reconnect delay policy: linear growth to a cap, plus jitter.

use std::time::Duration;

use rand::RngExt;

use mentorlink_core::config::realtime::RealtimeConfig;

/// Computes successive reconnect delays.
///
/// The base delay grows linearly with the attempt count (`initial × n`)
/// until it reaches the cap; a uniform random jitter is added on top so a
/// fleet of clients does not reconnect in lockstep after a server restart.
#[derive(Debug)]
pub struct ReconnectBackoff {
    /// First-attempt base delay.
    initial: Duration,
    /// Base delay ceiling.
    cap: Duration,
    /// Upper bound of the added jitter, in milliseconds.
    jitter_ms: u64,
    /// Failed attempts since the last reset.
    attempt: u32,
}

impl ReconnectBackoff {
    /// Create a policy from configuration.
    pub fn new(config: &RealtimeConfig) -> Self {
        Self {
            initial: Duration::from_millis(config.reconnect_initial_ms),
            cap: Duration::from_millis(config.reconnect_cap_ms),
            jitter_ms: config.reconnect_jitter_ms,
            attempt: 0,
        }
    }

    /// Forget the attempt count after a successful connection.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// The delay to sleep before the next attempt.
    pub fn next_delay(&mut self) -> Duration {
        self.attempt = self.attempt.saturating_add(1);
        let base = (self.initial * self.attempt).min(self.cap);
        let jitter = if self.jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::rng().random_range(0..=self.jitter_ms))
        };
        base + jitter
    }
}
