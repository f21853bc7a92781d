//! # mentorlink-auth
//!
//! Session lifecycle for the MentorLink client: bearer-token claim
//! decoding with fail-closed expiry checking, and the single authoritative
//! session store (bootstrap, login, signup, logout, profile refresh).

pub mod session;
pub mod token;

pub use session::state::SessionState;
pub use session::store::{AuthOutcome, SessionStore};
pub use token::claims::TokenClaims;
pub use token::decoder::{decode_claims, is_expired};
