//! Request body DTOs.

use serde::{Deserialize, Serialize};

use mentorlink_entity::user::UserRole;

/// Body of `POST /user/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login email address.
    pub email: String,
    /// Plaintext password, sent over TLS.
    pub password: String,
}

/// Body of `POST /user/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name.
    pub name: String,
    /// Login email address.
    pub email: String,
    /// Plaintext password, sent over TLS.
    pub password: String,
    /// Requested marketplace role.
    pub role: UserRole,
}

/// Body of `POST /wallet/topup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopupRequest {
    /// Amount to add, in minor currency units.
    pub amount: i64,
}
