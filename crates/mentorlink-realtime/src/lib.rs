//! # mentorlink-realtime
//!
//! The client side of the MentorLink realtime channel: a websocket
//! connection with unbounded automatic reconnection, room-join semantics
//! re-issued on every (re)connect, and typed server/client events.
//!
//! There is exactly one [`RealtimeClient`] per application, constructed by
//! the application root and passed down by reference. Its lifecycle is
//! explicit: [`RealtimeClient::connect`] / [`RealtimeClient::disconnect`].

pub mod connection;
pub mod message;
pub mod room;

pub use connection::client::{ConnectionState, RealtimeClient};
pub use message::types::{ClientEvent, ServerEvent};
pub use room::{Room, RoomSide};
