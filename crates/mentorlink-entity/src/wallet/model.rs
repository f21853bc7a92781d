//! Wallet entity model.

use serde::{Deserialize, Serialize};

/// The user's wallet balances as served by `GET /wallet`.
///
/// Amounts are in minor currency units. The client never derives a new
/// balance locally; any `wallet:update` event triggers a full refetch so
/// the displayed balance cannot drift from the server ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Spendable balance.
    pub available_balance: i64,
    /// Balance locked against in-flight sessions and challenges.
    pub locked_balance: i64,
}

impl Wallet {
    /// Total of available and locked funds.
    pub fn total(&self) -> i64 {
        self.available_balance + self.locked_balance
    }
}
