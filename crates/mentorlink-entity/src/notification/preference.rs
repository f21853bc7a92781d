//! Notification preference entity.

use serde::{Deserialize, Serialize};

/// Per-user notification delivery preferences, keyed by category.
///
/// Served by `GET /notifications/preferences` and replaced wholesale by
/// `PUT /notifications/preferences`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    /// Mentorship session lifecycle notifications.
    #[serde(default)]
    pub session: CategoryPreference,
    /// Challenge lifecycle notifications.
    #[serde(default)]
    pub challenge: CategoryPreference,
    /// Chat messages.
    #[serde(default)]
    pub chat: CategoryPreference,
    /// Wallet and payout notifications.
    #[serde(default)]
    pub wallet: CategoryPreference,
    /// System announcements.
    #[serde(default)]
    pub system: CategoryPreference,
}

/// Preference settings for a single notification category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPreference {
    /// Whether this category is enabled at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether to deliver via the realtime channel.
    #[serde(default = "default_true")]
    pub realtime: bool,
    /// Whether to deliver via email.
    #[serde(default)]
    pub email: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            session: CategoryPreference::default(),
            challenge: CategoryPreference::default(),
            chat: CategoryPreference::default(),
            wallet: CategoryPreference::default(),
            system: CategoryPreference::default(),
        }
    }
}

impl Default for CategoryPreference {
    fn default() -> Self {
        Self {
            enabled: true,
            realtime: true,
            email: false,
        }
    }
}

fn default_true() -> bool {
    true
}
