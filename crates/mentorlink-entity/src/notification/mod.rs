//! Notification entity and preference types.

pub mod model;
pub mod preference;

pub use model::Notification;
pub use preference::{CategoryPreference, NotificationPreferences};
