//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A notification delivered to a user, either by the initial fetch or by a
/// `new_notification` push event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier. Unique within the in-memory list.
    pub id: Uuid,
    /// Notification title.
    pub title: String,
    /// Longer body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Event kind that produced this notification.
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the user has read this notification. Monotonic false→true
    /// except across a full refetch.
    pub is_read: bool,
    /// When the notification was created server-side.
    pub created_at: DateTime<Utc>,
    /// Additional structured data (JSON).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<serde_json::Value>,
}

impl Notification {
    /// Check whether the notification is still unread.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}
