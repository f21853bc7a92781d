//! HTTP client core: request construction, auth header, error mapping.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::debug;

use mentorlink_core::config::api::ApiConfig;
use mentorlink_core::error::{AppError, ErrorKind};
use mentorlink_core::result::AppResult;
use mentorlink_core::types::ApiEnvelope;

/// REST client for the MentorLink backend.
///
/// Cheap to clone; clones share the HTTP connection pool and the bearer
/// token slot.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
    /// Current bearer token, owned by the session store.
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Replace the bearer token used on subsequent requests.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    /// The current bearer token, if any.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Issue a request without a body and unwrap the envelope payload.
    pub(crate) async fn request<T>(
        &self,
        method: Method,
        path: &str,
        reject_kind: ErrorKind,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let builder = self.http.request(method, self.url(path));
        let (status, body) = self.send(builder, path).await?;
        parse_payload(status, &body, reject_kind)
    }

    /// Issue a request with a JSON body and unwrap the envelope payload.
    pub(crate) async fn request_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        reject_kind: ErrorKind,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.http.request(method, self.url(path)).json(body);
        let (status, body) = self.send(builder, path).await?;
        parse_payload(status, &body, reject_kind)
    }

    /// Issue a request and treat the envelope as a bare acknowledgement:
    /// `data` may be absent, only `success` matters.
    pub(crate) async fn request_ack(
        &self,
        method: Method,
        path: &str,
        reject_kind: ErrorKind,
    ) -> AppResult<()> {
        let builder = self.http.request(method, self.url(path));
        let (status, body) = self.send(builder, path).await?;
        parse_envelope::<serde_json::Value>(status, &body)?.into_ack(reject_kind)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token, send, and read the response body.
    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        path: &str,
    ) -> AppResult<(StatusCode, String)> {
        let builder = match self.token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            AppError::with_source(ErrorKind::Network, format!("Request failed: {e}"), e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Network,
                format!("Failed to read response body: {e}"),
                e,
            )
        })?;

        debug!(%path, %status, "API response");
        Ok((status, body))
    }
}

/// Parse the response envelope, mapping auth and status failures first.
fn parse_envelope<T>(status: StatusCode, body: &str) -> AppResult<ApiEnvelope<T>>
where
    T: DeserializeOwned,
{
    if status == StatusCode::UNAUTHORIZED {
        let message =
            extract_message(body).unwrap_or_else(|| "Authentication required".to_string());
        return Err(AppError::authentication(message));
    }

    match serde_json::from_str::<ApiEnvelope<T>>(body) {
        Ok(envelope) => Ok(envelope),
        Err(e) if status.is_success() => {
            Err(AppError::validation(format!("Malformed response body: {e}")))
        }
        Err(_) => Err(status_error(status, body)),
    }
}

/// Parse the envelope and unwrap its payload.
fn parse_payload<T>(status: StatusCode, body: &str, reject_kind: ErrorKind) -> AppResult<T>
where
    T: DeserializeOwned,
{
    parse_envelope(status, body)?.into_data(reject_kind)
}

/// Pull the envelope message out of an arbitrary error body, if present.
fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
}

/// Map a non-2xx status without a parseable envelope into the taxonomy.
fn status_error(status: StatusCode, body: &str) -> AppError {
    let message = extract_message(body).unwrap_or_else(|| format!("Server returned {status}"));
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::validation(message),
        StatusCode::NOT_FOUND => AppError::not_found(message),
        _ => AppError::network(message),
    }
}
