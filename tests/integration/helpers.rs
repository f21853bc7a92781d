//! Shared test helpers: an in-process mock of the MentorLink backend
//! (REST + websocket) and session wiring against it.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{any, delete, get, patch, post};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use mentorlink_api::ApiClient;
use mentorlink_auth::SessionStore;
use mentorlink_core::config::api::ApiConfig;
use mentorlink_core::config::realtime::RealtimeConfig;
use mentorlink_core::config::session::SessionConfig;
use mentorlink_store::memory::MemoryCredentialStore;
use mentorlink_store::{CredentialStore, CredentialVault};

/// The password the mock backend accepts.
pub const GOOD_PASSWORD: &str = "open sesame";

/// Shared state behind the mock routes.
#[derive(Clone)]
struct MockState {
    /// The token the backend issues and accepts.
    token: String,
    /// The user it serves.
    user: Value,
    /// Frames received over the websocket, forwarded to the test.
    frames_tx: mpsc::UnboundedSender<String>,
    /// Frames the test pushes to every connected websocket.
    push_tx: broadcast::Sender<String>,
    /// Closes every connected websocket when fired.
    kick_tx: broadcast::Sender<()>,
    /// Number of `GET /wallet` calls served.
    wallet_fetches: Arc<AtomicUsize>,
}

/// Handle to a running mock backend.
pub struct MockBackend {
    /// REST base URL.
    pub base_url: String,
    /// Websocket URL.
    pub ws_url: String,
    /// The token the backend issues and accepts.
    pub token: String,
    /// The served user's id.
    pub user_id: Uuid,
    /// Frames received over the websocket.
    pub frames: mpsc::UnboundedReceiver<String>,
    /// Sender for pushing frames to connected clients.
    pub push: broadcast::Sender<String>,
    /// Fires to drop every websocket connection.
    pub kick: broadcast::Sender<()>,
    /// Number of `GET /wallet` calls served.
    pub wallet_fetches: Arc<AtomicUsize>,
}

/// Build a compact-form token with the given expiry offset.
pub fn make_token(user_id: Uuid, role: &str, expires_in_seconds: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let exp = chrono::Utc::now().timestamp() + expires_in_seconds;
    let payload = URL_SAFE_NO_PAD.encode(
        json!({"sub": user_id, "role": role, "exp": exp}).to_string(),
    );
    format!("{header}.{payload}.testsignature")
}

/// Start the mock backend for a user with the given role.
pub async fn spawn_backend(role: &str) -> MockBackend {
    let user_id = Uuid::new_v4();
    let token = make_token(user_id, role, 3_600);
    let user = json!({
        "id": user_id,
        "name": "Ada",
        "email": "ada@example.com",
        "role": role,
        "createdAt": "2024-05-01T10:00:00Z"
    });

    let (frames_tx, frames) = mpsc::unbounded_channel();
    let (push_tx, _) = broadcast::channel(32);
    let (kick_tx, _) = broadcast::channel(4);
    let wallet_fetches = Arc::new(AtomicUsize::new(0));

    let state = MockState {
        token: token.clone(),
        user: user.clone(),
        frames_tx,
        push_tx: push_tx.clone(),
        kick_tx: kick_tx.clone(),
        wallet_fetches: Arc::clone(&wallet_fetches),
    };

    let app = Router::new()
        .route("/user/login", post(login))
        .route("/user/profile", get(profile))
        .route("/auth/logout", post(ack))
        .route("/notifications", get(notifications))
        .route("/notifications/{id}/read", patch(ack))
        .route("/notifications/read-all", patch(ack))
        .route("/notifications/{id}", delete(ack))
        .route("/wallet", get(wallet))
        .route("/ws", any(ws_upgrade))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{addr}"),
        ws_url: format!("ws://{addr}/ws"),
        token,
        user_id,
        frames,
        push: push_tx,
        kick: kick_tx,
        wallet_fetches,
    }
}

impl MockBackend {
    /// An API client pointed at this backend.
    pub fn api(&self) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: self.base_url.clone(),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    /// A session store over an in-memory vault.
    pub fn session(&self, store: Arc<dyn CredentialStore>) -> SessionStore {
        SessionStore::new(
            self.api(),
            CredentialVault::from_provider(store),
            SessionConfig::default(),
        )
    }

    /// Realtime configuration with fast reconnects for tests.
    pub fn realtime_config(&self) -> RealtimeConfig {
        RealtimeConfig {
            url: self.ws_url.clone(),
            reconnect_initial_ms: 50,
            reconnect_cap_ms: 200,
            reconnect_jitter_ms: 10,
            ..RealtimeConfig::default()
        }
    }

    /// Push an event frame to every connected websocket client.
    pub fn push_event(&self, event: &str, data: Value) {
        let frame = json!({"event": event, "data": data}).to_string();
        // No receivers just means no client is connected yet.
        let _ = self.push.send(frame);
    }

    /// Await the next websocket frame, decoded as JSON.
    pub async fn next_frame(&mut self) -> Value {
        let raw = tokio::time::timeout(Duration::from_secs(5), self.frames.recv())
            .await
            .expect("timed out waiting for a websocket frame")
            .expect("websocket frame channel closed");
        serde_json::from_str(&raw).expect("websocket frame was not JSON")
    }
}

/// An empty in-memory credential store.
pub fn empty_store() -> Arc<MemoryCredentialStore> {
    Arc::new(MemoryCredentialStore::new())
}

/// An in-memory credential store preloaded with a token.
pub async fn store_with_token(token: &str) -> Arc<MemoryCredentialStore> {
    let store = empty_store();
    store.set("auth_token", token).await.unwrap();
    store
}

async fn login(State(state): State<MockState>, body: axum::Json<Value>) -> impl IntoResponse {
    if body["password"] == GOOD_PASSWORD {
        axum::Json(json!({
            "success": true,
            "data": {"token": state.token, "user": state.user}
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({"success": false, "message": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn profile(State(state): State<MockState>, headers: HeaderMap) -> impl IntoResponse {
    let expected = format!("Bearer {}", state.token);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);

    if authorized {
        axum::Json(json!({"success": true, "data": state.user})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({"success": false, "message": "Token rejected"})),
        )
            .into_response()
    }
}

async fn notifications(State(_state): State<MockState>) -> axum::Json<Value> {
    axum::Json(json!({
        "success": true,
        "data": {
            "notifications": [
                {
                    "id": "aaaaaaaa-0000-0000-0000-000000000001",
                    "title": "Session confirmed",
                    "type": "session",
                    "isRead": false,
                    "createdAt": "2024-06-10T08:30:00Z"
                },
                {
                    "id": "aaaaaaaa-0000-0000-0000-000000000002",
                    "title": "Welcome to MentorLink",
                    "type": "system",
                    "isRead": true,
                    "createdAt": "2024-06-01T08:00:00Z"
                }
            ],
            "unreadCount": 1
        }
    }))
}

async fn wallet(State(state): State<MockState>) -> axum::Json<Value> {
    state.wallet_fetches.fetch_add(1, Ordering::SeqCst);
    axum::Json(json!({
        "success": true,
        "data": {"availableBalance": 5_000, "lockedBalance": 1_500}
    }))
}

async fn ack() -> axum::Json<Value> {
    axum::Json(json!({"success": true}))
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<MockState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: MockState) {
    let mut push_rx = state.push_tx.subscribe();
    let mut kick_rx = state.kick_tx.subscribe();

    loop {
        tokio::select! {
            _ = kick_rx.recv() => break,
            inbound = socket.recv() => match inbound {
                Some(Ok(WsMessage::Text(text))) => {
                    let _ = state.frames_tx.send(text.to_string());
                }
                Some(Ok(WsMessage::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(_)) => break,
            },
            pushed = push_rx.recv() => {
                if let Ok(frame) = pushed {
                    if socket.send(WsMessage::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}
