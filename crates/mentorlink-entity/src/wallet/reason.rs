//! Wallet update reason enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the server pushed a `wallet:update` event.
///
/// The reason is informational only (toast/log text). It is never used to
/// compute a balance delta locally — every reason triggers the same full
/// refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletUpdateReason {
    /// Funds added via a top-up.
    Topup,
    /// Funds locked for a booked mentorship session.
    SessionLock,
    /// Session funds released to the mentor.
    SessionRelease,
    /// Session funds refunded to the mentee.
    SessionRefund,
    /// Funds locked for a posted challenge.
    ChallengeLock,
    /// Challenge funds released to the solver.
    ChallengeRelease,
    /// Funds withdrawn to an external account.
    Payout,
}

impl WalletUpdateReason {
    /// Human-readable description for toasts and logs.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Topup => "wallet topped up",
            Self::SessionLock => "funds locked for a session",
            Self::SessionRelease => "session funds released",
            Self::SessionRefund => "session funds refunded",
            Self::ChallengeLock => "funds locked for a challenge",
            Self::ChallengeRelease => "challenge funds released",
            Self::Payout => "payout processed",
        }
    }
}

impl fmt::Display for WalletUpdateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
