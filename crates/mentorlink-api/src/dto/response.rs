//! Response payload DTOs.

use serde::{Deserialize, Serialize};

use mentorlink_entity::notification::Notification;
use mentorlink_entity::user::UserProfile;

/// Payload of a successful `POST /user/login` or `POST /user/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    /// Bearer token to persist and attach to subsequent requests.
    pub token: String,
    /// The authenticated user's profile.
    pub user: UserProfile,
}

/// Payload of `GET /notifications?role=`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationList {
    /// Notifications, newest first.
    pub notifications: Vec<Notification>,
    /// Server-computed unread count.
    pub unread_count: u64,
}
