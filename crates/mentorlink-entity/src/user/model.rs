//! User profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::UserRole;

/// The authenticated user's profile as served by `GET /user/profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email address.
    pub email: String,
    /// Marketplace role.
    pub role: UserRole,
    /// Short self-description shown on the public profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = r#"{
            "id": "7b1d62bc-93ce-4c4f-9c3d-111111111111",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "mentor",
            "avatarUrl": "https://cdn.example.com/a.png",
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role, UserRole::Mentor);
        assert_eq!(profile.avatar_url.as_deref(), Some("https://cdn.example.com/a.png"));
        assert!(profile.bio.is_none());
    }
}
