//! Notification endpoints.

use reqwest::Method;
use uuid::Uuid;

use mentorlink_core::error::ErrorKind;
use mentorlink_core::result::AppResult;
use mentorlink_entity::notification::NotificationPreferences;
use mentorlink_entity::user::UserRole;

use crate::client::ApiClient;
use crate::dto::response::NotificationList;

impl ApiClient {
    /// `GET /notifications?role=` — the full current list plus unread count.
    pub async fn list_notifications(&self, role: UserRole) -> AppResult<NotificationList> {
        self.request(
            Method::GET,
            &format!("/notifications?role={}", role.as_str()),
            ErrorKind::Validation,
        )
        .await
    }

    /// `PATCH /notifications/:id/read`.
    pub async fn mark_notification_read(&self, id: Uuid) -> AppResult<()> {
        self.request_ack(
            Method::PATCH,
            &format!("/notifications/{id}/read"),
            ErrorKind::Validation,
        )
        .await
    }

    /// `PATCH /notifications/read-all`.
    pub async fn mark_all_notifications_read(&self) -> AppResult<()> {
        self.request_ack(
            Method::PATCH,
            "/notifications/read-all",
            ErrorKind::Validation,
        )
        .await
    }

    /// `DELETE /notifications/:id`.
    pub async fn delete_notification(&self, id: Uuid) -> AppResult<()> {
        self.request_ack(
            Method::DELETE,
            &format!("/notifications/{id}"),
            ErrorKind::Validation,
        )
        .await
    }

    /// `GET /notifications/preferences`.
    pub async fn notification_preferences(&self) -> AppResult<NotificationPreferences> {
        self.request(
            Method::GET,
            "/notifications/preferences",
            ErrorKind::Validation,
        )
        .await
    }

    /// `PUT /notifications/preferences` — replaces the preference document.
    pub async fn update_notification_preferences(
        &self,
        preferences: &NotificationPreferences,
    ) -> AppResult<NotificationPreferences> {
        self.request_json(
            Method::PUT,
            "/notifications/preferences",
            preferences,
            ErrorKind::Validation,
        )
        .await
    }
}
