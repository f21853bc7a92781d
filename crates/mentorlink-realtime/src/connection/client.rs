//! The reconnecting realtime client.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{Mutex, RwLock, broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use mentorlink_core::config::realtime::RealtimeConfig;
use mentorlink_core::error::AppError;
use mentorlink_core::result::AppResult;

use crate::message::envelope::{decode_server_event, encode_client_event};
use crate::message::types::{ClientEvent, ServerEvent};
use crate::room::Room;

use super::backoff::ReconnectBackoff;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Observable connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection and no attempt in flight.
    Disconnected,
    /// An attempt is in flight.
    Connecting,
    /// The channel is up.
    Connected,
}

/// Handle to a running supervisor task.
#[derive(Debug)]
struct ChannelHandle {
    /// Stops the supervisor and closes the connection.
    cancel: CancellationToken,
    /// The supervisor task itself.
    task: JoinHandle<()>,
}

/// The application's single realtime channel.
///
/// Constructed once by the application root and passed down by reference;
/// `connect` and `disconnect` are its explicit lifecycle. After
/// `disconnect`, a later `connect` starts a completely fresh connection —
/// nothing (including server-side room membership) is assumed to carry
/// over.
#[derive(Debug)]
pub struct RealtimeClient {
    /// Channel configuration.
    config: RealtimeConfig,
    /// Fan-out of inbound events.
    events: broadcast::Sender<ServerEvent>,
    /// Published connection state.
    state: watch::Sender<ConnectionState>,
    /// Rooms to (re)join on every successful connect.
    rooms: Arc<RwLock<Vec<Room>>>,
    /// Sender half of the outbound queue for the current connection.
    outbound: Arc<RwLock<Option<mpsc::Sender<ClientEvent>>>>,
    /// The running supervisor, if any.
    handle: Mutex<Option<ChannelHandle>>,
}

impl RealtimeClient {
    /// Create a client; no connection is attempted yet.
    pub fn new(config: RealtimeConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_buffer_size);
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            config,
            events,
            state,
            rooms: Arc::new(RwLock::new(Vec::new())),
            outbound: Arc::new(RwLock::new(None)),
            handle: Mutex::new(None),
        }
    }

    /// Subscribe to inbound events.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.events.subscribe()
    }

    /// Observe connection state transitions.
    pub fn state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Whether the channel is currently up.
    pub fn is_connected(&self) -> bool {
        *self.state.borrow() == ConnectionState::Connected
    }

    /// Start the supervisor task with the given bearer token.
    ///
    /// Reconnection is automatic and unbounded; individual connection
    /// failures are logged, never surfaced as fatal. Errors here mean the
    /// client is already connected.
    pub async fn connect(&self, token: Option<String>) -> AppResult<()> {
        let mut handle = self.handle.lock().await;
        if handle.is_some() {
            return Err(AppError::realtime(
                "Realtime channel is already connected; disconnect first",
            ));
        }

        let cancel = CancellationToken::new();
        let (outbound_tx, outbound_rx) = mpsc::channel(self.config.event_buffer_size);
        *self.outbound.write().await = Some(outbound_tx);

        let task = tokio::spawn(supervise(
            self.config.clone(),
            token,
            Arc::clone(&self.rooms),
            self.events.clone(),
            self.state.clone(),
            outbound_rx,
            cancel.clone(),
        ));

        *handle = Some(ChannelHandle { cancel, task });
        Ok(())
    }

    /// Stop the supervisor and tear down the connection.
    ///
    /// Needed across logout/login cycles: the next `connect` joins rooms
    /// from a clean slate instead of inheriting stale membership.
    pub async fn disconnect(&self) {
        let handle = self.handle.lock().await.take();
        if let Some(ChannelHandle { cancel, task }) = handle {
            cancel.cancel();
            let _ = task.await;
        }
        *self.outbound.write().await = None;
        self.rooms.write().await.clear();
        self.state.send_replace(ConnectionState::Disconnected);
        info!("Realtime channel torn down");
    }

    /// Replace the desired-rooms set.
    ///
    /// When connected, join events for the new set are emitted
    /// immediately; either way the whole set is re-emitted on every
    /// future (re)connect.
    pub async fn set_rooms(&self, rooms: Vec<Room>) {
        {
            let mut desired = self.rooms.write().await;
            *desired = rooms.clone();
        }
        if self.is_connected() {
            for room in rooms {
                self.emit(room.join_event()).await;
            }
        }
    }

    /// Add a room to the desired set and join it if connected.
    pub async fn join(&self, room: Room) {
        {
            let mut desired = self.rooms.write().await;
            if !desired.contains(&room) {
                desired.push(room);
            }
        }
        if self.is_connected() {
            self.emit(room.join_event()).await;
        }
    }

    /// Remove a room from the desired set and leave it if connected.
    pub async fn leave(&self, room: Room) {
        self.rooms.write().await.retain(|r| r != &room);
        if self.is_connected() {
            self.emit(room.leave_event()).await;
        }
    }

    /// Emit an event to the server.
    ///
    /// While disconnected this is a warn-and-drop: room membership is not
    /// lost because the desired-rooms set is replayed on reconnect, and
    /// nothing else the client emits is worth buffering indefinitely.
    pub async fn emit(&self, event: ClientEvent) {
        if !self.is_connected() {
            warn!(event = event.event_name(), "Dropping emit while disconnected");
            return;
        }
        let sender = self.outbound.read().await.clone();
        match sender {
            Some(sender) => {
                if sender.send(event).await.is_err() {
                    debug!("Outbound queue closed mid-emit");
                }
            }
            None => warn!("Emit with no active connection"),
        }
    }
}

/// Build the websocket URL, attaching the bearer token as a query
/// parameter when present.
fn build_url(base: &str, token: Option<&str>) -> String {
    match token {
        Some(token) if !token.is_empty() => {
            let separator = if base.contains('?') { '&' } else { '?' };
            format!("{base}{separator}token={token}")
        }
        _ => base.to_string(),
    }
}

/// Connection supervisor: connect, run, back off, repeat until cancelled.
async fn supervise(
    config: RealtimeConfig,
    token: Option<String>,
    rooms: Arc<RwLock<Vec<Room>>>,
    events: broadcast::Sender<ServerEvent>,
    state: watch::Sender<ConnectionState>,
    mut outbound_rx: mpsc::Receiver<ClientEvent>,
    cancel: CancellationToken,
) {
    let url = build_url(&config.url, token.as_deref());
    let mut backoff = ReconnectBackoff::new(&config);

    loop {
        state.send_replace(ConnectionState::Connecting);

        match connect_async(url.as_str()).await {
            Ok((ws, _response)) => {
                info!("Realtime channel connected");
                backoff.reset();
                state.send_replace(ConnectionState::Connected);
                run_session(ws, &rooms, &events, &mut outbound_rx, &cancel).await;
            }
            Err(err) => {
                warn!("Realtime connect failed: {err}");
            }
        }

        state.send_replace(ConnectionState::Disconnected);
        if cancel.is_cancelled() {
            break;
        }

        let delay = backoff.next_delay();
        debug!(delay_ms = delay.as_millis() as u64, "Reconnecting after backoff");
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    state.send_replace(ConnectionState::Disconnected);
    debug!("Realtime supervisor stopped");
}

/// Drive one live connection until it closes, errors, or is cancelled.
async fn run_session(
    mut ws: WsStream,
    rooms: &Arc<RwLock<Vec<Room>>>,
    events: &broadcast::Sender<ServerEvent>,
    outbound_rx: &mut mpsc::Receiver<ClientEvent>,
    cancel: &CancellationToken,
) {
    // Server-side membership does not survive a reconnect, so the join
    // events go out on every connect, not just the first.
    let desired: Vec<Room> = rooms.read().await.clone();
    for room in desired {
        if !send_event(&mut ws, &room.join_event()).await {
            return;
        }
        debug!(room = %room, "Joined room");
    }

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = ws.close(None).await;
                return;
            }
            Some(event) = outbound_rx.recv() => {
                if !send_event(&mut ws, &event).await {
                    return;
                }
            }
            inbound = ws.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match decode_server_event(text.as_str()) {
                            Ok(Some(event)) => {
                                // Send only fails with zero receivers; that
                                // is fine, subscribers come and go.
                                let _ = events.send(event);
                            }
                            Ok(None) => debug!("Ignoring unknown event frame"),
                            Err(err) => debug!("Dropping undecodable frame: {err}"),
                        }
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        if ws.send(Message::Pong(payload)).await.is_err() {
                            return;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Realtime channel closed by server");
                        return;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        warn!("Realtime read error: {err}");
                        return;
                    }
                }
            }
        }
    }
}

/// Encode and send one event; false means the connection is unusable.
async fn send_event(ws: &mut WsStream, event: &ClientEvent) -> bool {
    let frame = match encode_client_event(event) {
        Ok(frame) => frame,
        Err(err) => {
            warn!("Failed to encode {}: {err}", event.event_name());
            return true;
        }
    };
    match ws.send(Message::Text(frame.into())).await {
        Ok(()) => true,
        Err(err) => {
            warn!("Realtime send failed: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_token_placement() {
        assert_eq!(
            build_url("ws://h/ws", Some("abc")),
            "ws://h/ws?token=abc"
        );
        assert_eq!(
            build_url("ws://h/ws?v=2", Some("abc")),
            "ws://h/ws?v=2&token=abc"
        );
        assert_eq!(build_url("ws://h/ws", None), "ws://h/ws");
        assert_eq!(build_url("ws://h/ws", Some("")), "ws://h/ws");
    }

    #[tokio::test]
    async fn test_connect_twice_is_an_error() {
        let client = RealtimeClient::new(RealtimeConfig {
            url: "ws://127.0.0.1:1".to_string(),
            ..RealtimeConfig::default()
        });
        client.connect(None).await.unwrap();
        assert!(client.connect(None).await.is_err());
        client.disconnect().await;
        // After a disconnect the client is reusable.
        client.connect(None).await.unwrap();
        client.disconnect().await;
    }
}
