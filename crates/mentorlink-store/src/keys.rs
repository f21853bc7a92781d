//! Fixed storage keys for persisted client state.

/// Key under which the bearer token string is stored.
pub const TOKEN: &str = "auth_token";

/// Key under which the cached profile JSON blob is stored.
pub const CACHED_PROFILE: &str = "cached_user";
