//! Cross-crate integration tests against an in-process mock backend.

mod helpers;
mod notification_test;
mod session_test;
mod wallet_test;
