//! Payload decoding for compact JWT-form bearer tokens.
//!
//! The client never holds signing keys, so there is no signature
//! verification here — only payload extraction and expiry checking. Any
//! decode failure is treated as an expired token (fail closed): the
//! session layer reacts to both identically by forcing logout.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use mentorlink_core::error::AppError;
use mentorlink_core::result::AppResult;

use super::claims::TokenClaims;

/// Decode the claims payload of a compact-form token.
pub fn decode_claims(token: &str) -> AppResult<TokenClaims> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => {
            return Err(AppError::token_expired(
                "Token is not in three-segment compact form",
            ));
        }
    };

    let raw = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AppError::token_expired(format!("Token payload is not base64url: {e}")))?;

    serde_json::from_slice(&raw)
        .map_err(|e| AppError::token_expired(format!("Token payload is not valid claims JSON: {e}")))
}

/// Whether a stored token string is unusable.
///
/// Returns true if the token is empty, malformed in any way, or its `exp`
/// claim is at or before now (minus `leeway_seconds` of clock skew).
pub fn is_expired(token: &str, leeway_seconds: u64) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.is_expired(leeway_seconds),
        Err(_) => true,
    }
}
