//! Authentication and profile endpoints.

use reqwest::Method;

use mentorlink_core::error::ErrorKind;
use mentorlink_core::result::AppResult;
use mentorlink_entity::user::UserProfile;

use crate::client::ApiClient;
use crate::dto::request::{LoginRequest, SignupRequest};
use crate::dto::response::AuthData;

impl ApiClient {
    /// `POST /user/login`. A rejection (bad credentials) surfaces as an
    /// [`ErrorKind::Authentication`] error carrying the server's message.
    pub async fn login(&self, request: &LoginRequest) -> AppResult<AuthData> {
        self.request_json(
            Method::POST,
            "/user/login",
            request,
            ErrorKind::Authentication,
        )
        .await
    }

    /// `POST /user/signup`. Same outcome shape as login.
    pub async fn signup(&self, request: &SignupRequest) -> AppResult<AuthData> {
        self.request_json(
            Method::POST,
            "/user/signup",
            request,
            ErrorKind::Validation,
        )
        .await
    }

    /// `POST /auth/logout`. Invalidates the token server-side.
    pub async fn logout(&self) -> AppResult<()> {
        self.request_ack(Method::POST, "/auth/logout", ErrorKind::Authentication)
            .await
    }

    /// `GET /user/profile` for the bearer of the current token.
    pub async fn profile(&self) -> AppResult<UserProfile> {
        self.request(Method::GET, "/user/profile", ErrorKind::Authentication)
            .await
    }
}
