//! The single authoritative session store.
//!
//! Owns the persisted credentials, the API client's token slot, and the
//! published [`SessionState`]. Every mutation runs under one internal lock
//! and publishes token + profile together, so observers never see an
//! intermediate token/profile mismatch.

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use mentorlink_api::ApiClient;
use mentorlink_api::dto::request::{LoginRequest, SignupRequest};
use mentorlink_api::dto::response::AuthData;
use mentorlink_core::config::session::SessionConfig;
use mentorlink_core::error::ErrorKind;
use mentorlink_core::result::AppResult;
use mentorlink_entity::user::{UserProfile, UserRole};
use mentorlink_store::CredentialVault;

use crate::token::decoder;

use super::state::SessionState;

/// Fallback message shown when login/signup fails for an unexpected
/// reason (transport error, malformed body). The raw error is logged,
/// never displayed.
const GENERIC_AUTH_FAILURE: &str = "Something went wrong. Please try again.";

/// Outcome of a login or signup attempt.
///
/// Credential rejections are part of the normal flow, not errors: the
/// message is meant for in-place display.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// The session is established.
    Success(UserProfile),
    /// The attempt was rejected; show the message to the user.
    Rejected {
        /// Display message (server-provided or generic fallback).
        message: String,
    },
}

impl AuthOutcome {
    /// Whether the attempt established a session.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Owns and publishes the client's session lifecycle.
#[derive(Debug)]
pub struct SessionStore {
    /// REST client whose token slot this store manages.
    api: ApiClient,
    /// Persisted credential vault.
    vault: CredentialVault,
    /// Session configuration.
    config: SessionConfig,
    /// Published state; observers subscribe for reactive reads.
    state: watch::Sender<SessionState>,
    /// Serializes state transitions.
    mutate: Mutex<()>,
}

impl SessionStore {
    /// Create a store in the unauthenticated state.
    pub fn new(api: ApiClient, vault: CredentialVault, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            api,
            vault,
            config,
            state,
            mutate: Mutex::new(()),
        }
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Whether a validated session is currently present.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Restore the session from persisted storage.
    ///
    /// No persisted token is a terminal unauthenticated state (no network
    /// call). A persisted token is first checked for expiry, then
    /// validated against `GET /user/profile`; **any** failure — network,
    /// 401, malformed body — clears the credentials and leaves the store
    /// unauthenticated. Fails closed.
    pub async fn bootstrap(&self) -> SessionState {
        let _guard = self.mutate.lock().await;

        let token = match self.vault.token().await {
            Ok(token) => token,
            Err(err) => {
                warn!("Failed to read persisted token, treating as absent: {err}");
                None
            }
        };

        let Some(token) = token else {
            debug!("No persisted token; starting unauthenticated");
            self.state.send_replace(SessionState::Unauthenticated);
            return self.current();
        };

        if decoder::is_expired(&token, self.config.expiry_leeway_seconds) {
            info!("Persisted token is expired or undecodable; clearing credentials");
            self.clear_locked().await;
            return self.current();
        }

        self.api.set_token(Some(token.clone())).await;
        match self.api.profile().await {
            Ok(profile) => {
                info!(user = %profile.id, role = %profile.role, "Session restored from storage");
                self.cache_profile(&profile).await;
                self.state
                    .send_replace(SessionState::Authenticated { profile, token });
            }
            Err(err) => {
                warn!("Token validation failed ({err}); clearing credentials");
                self.clear_locked().await;
            }
        }

        self.current()
    }

    /// Authenticate with email + password.
    ///
    /// Rejections come back as [`AuthOutcome::Rejected`] with the server's
    /// message; unexpected failures collapse to a generic message and are
    /// logged. This method does not return errors.
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = self.api.login(&request).await;
        self.finish_auth_attempt(result, "login").await
    }

    /// Create an account and establish a session.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> AuthOutcome {
        let request = SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        };
        let result = self.api.signup(&request).await;
        self.finish_auth_attempt(result, "signup").await
    }

    /// Tear down the session.
    ///
    /// Local credentials and state are cleared unconditionally; the server
    /// is notified best-effort and a failed notification changes nothing.
    pub async fn logout(&self) {
        let _guard = self.mutate.lock().await;

        let had_session = self.state.borrow().is_authenticated();
        if had_session {
            if let Err(err) = self.api.logout().await {
                debug!("Best-effort server logout failed: {err}");
            }
        }

        self.clear_locked().await;
        info!("Session cleared");
    }

    /// Re-fetch the profile and overwrite the published one.
    ///
    /// Used after profile edits. A 401 or expiry response forces logout;
    /// other failures (network) leave the session untouched.
    pub async fn refresh_profile(&self) -> AppResult<UserProfile> {
        let _guard = self.mutate.lock().await;

        let token = match self.state.borrow().token() {
            Some(token) => token.to_string(),
            None => {
                return Err(mentorlink_core::AppError::new(
                    ErrorKind::Authentication,
                    "Not logged in",
                ));
            }
        };

        match self.api.profile().await {
            Ok(profile) => {
                self.cache_profile(&profile).await;
                self.state.send_replace(SessionState::Authenticated {
                    profile: profile.clone(),
                    token,
                });
                Ok(profile)
            }
            Err(err) if err.forces_logout() => {
                warn!("Profile refresh rejected ({err}); forcing logout");
                self.clear_locked().await;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Common tail of login/signup: persist, publish, classify failures.
    async fn finish_auth_attempt(
        &self,
        result: AppResult<AuthData>,
        operation: &str,
    ) -> AuthOutcome {
        let _guard = self.mutate.lock().await;

        match result {
            Ok(AuthData { token, user }) => {
                if let Err(err) = self.vault.set_token(&token).await {
                    warn!("Failed to persist token after {operation}: {err}");
                    return AuthOutcome::Rejected {
                        message: GENERIC_AUTH_FAILURE.to_string(),
                    };
                }
                self.cache_profile(&user).await;
                self.api.set_token(Some(token.clone())).await;
                info!(user = %user.id, role = %user.role, "{operation} succeeded");
                self.state.send_replace(SessionState::Authenticated {
                    profile: user.clone(),
                    token,
                });
                AuthOutcome::Success(user)
            }
            Err(err)
                if matches!(err.kind, ErrorKind::Authentication | ErrorKind::Validation) =>
            {
                debug!("{operation} rejected: {}", err.message);
                AuthOutcome::Rejected {
                    message: err.message,
                }
            }
            Err(err) => {
                warn!("Unexpected {operation} failure: {err}");
                AuthOutcome::Rejected {
                    message: GENERIC_AUTH_FAILURE.to_string(),
                }
            }
        }
    }

    /// Cache the profile blob next to the token, when enabled.
    async fn cache_profile(&self, profile: &UserProfile) {
        if !self.config.cache_profile {
            return;
        }
        match serde_json::to_string(profile) {
            Ok(blob) => {
                if let Err(err) = self.vault.set_cached_profile(&blob).await {
                    warn!("Failed to cache profile: {err}");
                }
            }
            Err(err) => warn!("Failed to serialize profile for caching: {err}"),
        }
    }

    /// Clear persisted credentials, the API token slot, and published
    /// state. Callers must hold the mutation lock.
    async fn clear_locked(&self) {
        if let Err(err) = self.vault.clear().await {
            warn!("Failed to clear credential store: {err}");
        }
        self.api.set_token(None).await;
        self.state.send_replace(SessionState::Unauthenticated);
    }
}
