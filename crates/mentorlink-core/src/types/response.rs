//! The backend's standard JSON response envelope.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Standard `{ success, message, data }` envelope wrapping every REST
/// response body.
///
/// `message` carries the human-readable rejection reason when `success`
/// is false and is displayed in place by callers (failed login, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Whether the request was accepted.
    pub success: bool,
    /// Human-readable message, present mostly on rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The response payload, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, mapping a rejection into `reject_kind`.
    ///
    /// A successful envelope without a payload is a malformed body.
    pub fn into_data(self, reject_kind: ErrorKind) -> Result<T, AppError> {
        if self.success {
            self.data
                .ok_or_else(|| AppError::validation("Response envelope is missing its data field"))
        } else {
            Err(AppError::new(reject_kind, self.message_or_default()))
        }
    }

    /// Treat the envelope as an acknowledgement, discarding any payload.
    pub fn into_ack(self, reject_kind: ErrorKind) -> Result<(), AppError> {
        if self.success {
            Ok(())
        } else {
            Err(AppError::new(reject_kind, self.message_or_default()))
        }
    }

    /// The rejection message, or a generic fallback when the server sent none.
    pub fn message_or_default(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "Request was rejected by the server".to_string())
    }
}
