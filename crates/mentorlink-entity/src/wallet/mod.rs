//! Wallet entity and update-reason types.

pub mod model;
pub mod reason;

pub use model::Wallet;
pub use reason::WalletUpdateReason;
