//! In-memory session state.

use mentorlink_entity::user::UserProfile;

/// The client's authentication state.
///
/// Invariant: `Authenticated` always carries both a profile and the token
/// that proved it — the two are published together, never separately.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// No valid session.
    Unauthenticated,
    /// A validated session.
    Authenticated {
        /// The authenticated user's profile.
        profile: UserProfile,
        /// The bearer token backing the session.
        token: String,
    },
}

impl SessionState {
    /// Whether a validated session is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// The profile, when authenticated.
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated { profile, .. } => Some(profile),
            Self::Unauthenticated => None,
        }
    }

    /// The bearer token, when authenticated.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token, .. } => Some(token),
            Self::Unauthenticated => None,
        }
    }
}
