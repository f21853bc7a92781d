//! Envelope framing for channel messages.
//!
//! Every frame is a JSON object `{ "event": <name>, "data": <payload> }`.
//! Inbound frames with an event name the client does not recognize are
//! dropped (logged at debug level), since the server may ship new event
//! types before the client learns about them.

use serde::{Deserialize, Serialize};

use mentorlink_core::result::AppResult;

use super::types::{ClientEvent, ServerEvent};

/// Raw frame shape shared by both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event name.
    pub event: String,
    /// Event payload; absent payloads read as null.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Decode an inbound frame into a typed server event.
///
/// Returns `Ok(None)` for well-formed frames carrying an unknown event
/// name; returns an error only for frames that are not valid envelopes or
/// whose payload does not match the event's schema.
pub fn decode_server_event(raw: &str) -> AppResult<Option<ServerEvent>> {
    let envelope: EventEnvelope = serde_json::from_str(raw)?;
    ServerEvent::from_envelope(envelope)
}

/// Encode an outbound client event into a frame string.
pub fn encode_client_event(event: &ClientEvent) -> AppResult<String> {
    let envelope = EventEnvelope {
        event: event.event_name().to_string(),
        data: event.payload(),
    };
    Ok(serde_json::to_string(&envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_event_is_dropped_not_an_error() {
        let decoded = decode_server_event(r#"{"event":"totally_new_thing","data":{}}"#).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(decode_server_event("not json").is_err());
    }

    #[test]
    fn test_encode_join_frame() {
        let event = ClientEvent::JoinMentorRoom {
            room: "mentor_7b1d62bc-93ce-4c4f-9c3d-111111111111".to_string(),
        };
        let raw = encode_client_event(&event).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["event"], "join_mentor_room");
        assert_eq!(
            value["data"],
            "mentor_7b1d62bc-93ce-4c4f-9c3d-111111111111"
        );
    }
}
