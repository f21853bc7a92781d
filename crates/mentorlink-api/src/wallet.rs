//! Wallet endpoints.

use reqwest::Method;

use mentorlink_core::error::ErrorKind;
use mentorlink_core::result::AppResult;
use mentorlink_entity::wallet::Wallet;

use crate::client::ApiClient;
use crate::dto::request::TopupRequest;

impl ApiClient {
    /// `GET /wallet` — the authoritative balances. This is the only way
    /// the client ever learns a balance; it never does local arithmetic.
    pub async fn wallet(&self) -> AppResult<Wallet> {
        self.request(Method::GET, "/wallet", ErrorKind::Validation)
            .await
    }

    /// `POST /wallet/topup` — returns the updated wallet.
    pub async fn topup(&self, amount: i64) -> AppResult<Wallet> {
        self.request_json(
            Method::POST,
            "/wallet/topup",
            &TopupRequest { amount },
            ErrorKind::Validation,
        )
        .await
    }
}
