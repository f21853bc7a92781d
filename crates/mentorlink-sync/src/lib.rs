//! # mentorlink-sync
//!
//! Keeps client-side read models in step with the backend: the
//! notification feed (initial fetch + live push events + optimistic
//! mutations) and the wallet (refetch on every `wallet:update` event,
//! never local arithmetic).

pub mod notification;
pub mod wallet;

pub use notification::feed::{FeedPhase, FeedSnapshot, NotificationFeed};
pub use notification::listener::spawn_notification_listener;
pub use wallet::{WalletSync, spawn_wallet_listener};
