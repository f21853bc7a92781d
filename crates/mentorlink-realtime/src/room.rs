//! Dashboard room naming and membership events.

use std::fmt;

use uuid::Uuid;

use mentorlink_entity::user::UserRole;

use crate::message::types::ClientEvent;

/// Which side of the mentorship dashboard a room belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomSide {
    /// Mentor dashboard.
    Mentor,
    /// Mentee dashboard.
    Mentee,
}

impl RoomSide {
    /// The normalized role segment used in room names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mentor => "mentor",
            Self::Mentee => "mentee",
        }
    }
}

/// A server-side logical channel scoping which connected clients receive
/// a given push event, keyed by normalized role and user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Room {
    /// Dashboard side.
    pub side: RoomSide,
    /// Owning user.
    pub user_id: Uuid,
}

impl Room {
    /// The dashboard room for a user, if their role has one.
    ///
    /// Only the mentorship side of the marketplace has room-scoped push
    /// channels; innovator and solver roles return `None` and receive
    /// direct user events only.
    pub fn for_user(role: UserRole, user_id: Uuid) -> Option<Self> {
        let side = match role {
            UserRole::Mentor => RoomSide::Mentor,
            UserRole::Mentee => RoomSide::Mentee,
            UserRole::Innovator | UserRole::Solver => return None,
        };
        Some(Self { side, user_id })
    }

    /// The wire room name: `{role}_{userId}`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.side.as_str(), self.user_id)
    }

    /// The join event to emit on every successful (re)connect.
    pub fn join_event(&self) -> ClientEvent {
        match self.side {
            RoomSide::Mentor => ClientEvent::JoinMentorRoom { room: self.name() },
            RoomSide::Mentee => ClientEvent::JoinMenteeRoom { room: self.name() },
        }
    }

    /// The leave event to emit when abandoning the room.
    pub fn leave_event(&self) -> ClientEvent {
        match self.side {
            RoomSide::Mentor => ClientEvent::LeaveMentorRoom { room: self.name() },
            RoomSide::Mentee => ClientEvent::LeaveMenteeRoom { room: self.name() },
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
