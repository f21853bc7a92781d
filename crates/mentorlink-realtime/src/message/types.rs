//! Inbound and outbound channel event definitions.
//!
//! Event names are the backend's wire vocabulary and must not drift:
//! renaming a variant here without the server is a protocol break.

use serde::Deserialize;

use mentorlink_core::error::AppError;
use mentorlink_core::result::AppResult;
use mentorlink_entity::notification::Notification;
use mentorlink_entity::wallet::WalletUpdateReason;

use super::envelope::EventEnvelope;

/// Events pushed by the server.
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// `new_notification` — a notification for the current user.
    NewNotification(Notification),
    /// `dashboard_update` — dashboard aggregates changed.
    DashboardUpdate(serde_json::Value),
    /// `session_updated` — a mentorship session changed state.
    SessionUpdated(serde_json::Value),
    /// `session_request:update` — a session request changed state.
    SessionRequestUpdate(serde_json::Value),
    /// `availability_updated` — a mentor availability slot changed.
    AvailabilityUpdated(serde_json::Value),
    /// `availability_created` — a mentor availability slot was created.
    AvailabilityCreated(serde_json::Value),
    /// `wallet:update` — balances changed server-side for the given
    /// reason; the client must refetch, never compute.
    WalletUpdate {
        /// Why the balance changed. Informational only.
        reason: WalletUpdateReason,
    },
    /// `chat:room-created` — a chat room involving this user was created.
    ChatRoomCreated(serde_json::Value),
}

/// Payload of `wallet:update`.
#[derive(Debug, Clone, Deserialize)]
struct WalletUpdatePayload {
    /// Balance-change reason.
    reason: WalletUpdateReason,
}

impl ServerEvent {
    /// The wire event name.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::NewNotification(_) => "new_notification",
            Self::DashboardUpdate(_) => "dashboard_update",
            Self::SessionUpdated(_) => "session_updated",
            Self::SessionRequestUpdate(_) => "session_request:update",
            Self::AvailabilityUpdated(_) => "availability_updated",
            Self::AvailabilityCreated(_) => "availability_created",
            Self::WalletUpdate { .. } => "wallet:update",
            Self::ChatRoomCreated(_) => "chat:room-created",
        }
    }

    /// Build a typed event from a decoded envelope.
    ///
    /// `Ok(None)` means the event name is not part of the client's
    /// vocabulary.
    pub fn from_envelope(envelope: EventEnvelope) -> AppResult<Option<Self>> {
        let EventEnvelope { event, data } = envelope;
        let parsed = match event.as_str() {
            "new_notification" => {
                let notification: Notification = serde_json::from_value(data).map_err(|e| {
                    AppError::validation(format!("Malformed new_notification payload: {e}"))
                })?;
                Self::NewNotification(notification)
            }
            "dashboard_update" => Self::DashboardUpdate(data),
            "session_updated" => Self::SessionUpdated(data),
            "session_request:update" => Self::SessionRequestUpdate(data),
            "availability_updated" => Self::AvailabilityUpdated(data),
            "availability_created" => Self::AvailabilityCreated(data),
            "wallet:update" => {
                let payload: WalletUpdatePayload = serde_json::from_value(data).map_err(|e| {
                    AppError::validation(format!("Malformed wallet:update payload: {e}"))
                })?;
                Self::WalletUpdate {
                    reason: payload.reason,
                }
            }
            "chat:room-created" => Self::ChatRoomCreated(data),
            _ => return Ok(None),
        };
        Ok(Some(parsed))
    }
}

/// Events the client emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// `join_mentor_room` — enter the mentor dashboard room.
    JoinMentorRoom {
        /// Room name, `mentor_{userId}`.
        room: String,
    },
    /// `join_mentee_room` — enter the mentee dashboard room.
    JoinMenteeRoom {
        /// Room name, `mentee_{userId}`.
        room: String,
    },
    /// `leave_mentor_room`.
    LeaveMentorRoom {
        /// Room name, `mentor_{userId}`.
        room: String,
    },
    /// `leave_mentee_room`.
    LeaveMenteeRoom {
        /// Room name, `mentee_{userId}`.
        room: String,
    },
    /// `chat:join-room` — enter a chat room by id.
    ChatJoinRoom {
        /// Chat room identifier.
        room: String,
    },
}

impl ClientEvent {
    /// The wire event name.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::JoinMentorRoom { .. } => "join_mentor_room",
            Self::JoinMenteeRoom { .. } => "join_mentee_room",
            Self::LeaveMentorRoom { .. } => "leave_mentor_room",
            Self::LeaveMenteeRoom { .. } => "leave_mentee_room",
            Self::ChatJoinRoom { .. } => "chat:join-room",
        }
    }

    /// The frame payload.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::JoinMentorRoom { room }
            | Self::JoinMenteeRoom { room }
            | Self::LeaveMentorRoom { room }
            | Self::LeaveMenteeRoom { room }
            | Self::ChatJoinRoom { room } => serde_json::Value::String(room.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(event: &str, data: serde_json::Value) -> EventEnvelope {
        EventEnvelope {
            event: event.to_string(),
            data,
        }
    }

    #[test]
    fn test_wallet_update_parses_reason() {
        let event = ServerEvent::from_envelope(envelope(
            "wallet:update",
            serde_json::json!({"reason": "SESSION_REFUND"}),
        ))
        .unwrap()
        .unwrap();
        match event {
            ServerEvent::WalletUpdate { reason } => {
                assert_eq!(reason, WalletUpdateReason::SessionRefund);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_wallet_update_with_unknown_reason_is_an_error() {
        let result = ServerEvent::from_envelope(envelope(
            "wallet:update",
            serde_json::json!({"reason": "MYSTERY"}),
        ));
        assert!(result.is_err());
    }

    #[test]
    fn test_new_notification_parses_entity() {
        let event = ServerEvent::from_envelope(envelope(
            "new_notification",
            serde_json::json!({
                "id": "b9f8df1e-0b2f-43d7-8f0a-222222222222",
                "title": "Session booked",
                "type": "session_request",
                "isRead": false,
                "createdAt": "2024-06-10T08:30:00Z"
            }),
        ))
        .unwrap()
        .unwrap();
        match event {
            ServerEvent::NewNotification(notification) => {
                assert_eq!(notification.title, "Session booked");
                assert!(notification.is_unread());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_passthrough_events_keep_payload() {
        let event = ServerEvent::from_envelope(envelope(
            "session_request:update",
            serde_json::json!({"sessionId": "abc"}),
        ))
        .unwrap()
        .unwrap();
        assert_eq!(event.event_name(), "session_request:update");
    }
}
