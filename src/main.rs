//! MentorLink live client.
//!
//! Entry point that wires the client crates together: restores the
//! persisted session, connects the realtime channel, joins the dashboard
//! room, and streams notification and wallet updates until interrupted.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use mentorlink_api::ApiClient;
use mentorlink_auth::SessionStore;
use mentorlink_core::config::AppConfig;
use mentorlink_core::error::AppError;
use mentorlink_realtime::{ClientEvent, RealtimeClient, Room, ServerEvent};
use mentorlink_store::CredentialVault;
use mentorlink_sync::{NotificationFeed, WalletSync, spawn_notification_listener};

#[tokio::main]
async fn main() {
    let env = std::env::var("MENTORLINK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main client run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting MentorLink client v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Wire the client components ───────────────────────
    let api = ApiClient::new(&config.api)?;
    let vault = CredentialVault::new(&config.credentials)?;
    let session = SessionStore::new(api.clone(), vault, config.session.clone());

    // ── Step 2: Restore the session from storage ─────────────────
    let state = session.bootstrap().await;
    let Some(profile) = state.profile().cloned() else {
        tracing::error!("No valid session. Log in with `mentorlink-cli login` and retry.");
        return Err(AppError::authentication("Not logged in"));
    };
    tracing::info!(user = %profile.name, role = %profile.role, "Session restored");

    // ── Step 3: Connect the realtime channel ─────────────────────
    let realtime = RealtimeClient::new(config.realtime.clone());
    realtime.connect(state.token().map(String::from)).await?;

    match Room::for_user(profile.role, profile.id) {
        Some(room) => {
            tracing::info!(room = %room, "Joining dashboard room");
            realtime.join(room).await;
        }
        None => {
            tracing::info!(role = %profile.role, "Role has no dashboard room; direct events only");
        }
    }

    // ── Step 4: Start the notification feed ──────────────────────
    let feed = Arc::new(NotificationFeed::new(api.clone()));
    if let Err(e) = feed.fetch(profile.role).await {
        tracing::warn!("Initial notification fetch failed (retry manually): {e}");
    } else {
        let snapshot = feed.snapshot();
        tracing::info!(
            count = snapshot.items.len(),
            unread = snapshot.unread_count,
            "Notification feed ready"
        );
    }
    let feed_task = spawn_notification_listener(Arc::clone(&feed), realtime.subscribe());

    // ── Step 5: Start the wallet sync ────────────────────────────
    let wallet = Arc::new(WalletSync::new(api.clone()));
    match wallet.refresh().await {
        Ok(w) => tracing::info!(available = w.available_balance, locked = w.locked_balance, "Wallet loaded"),
        Err(e) => tracing::warn!("Initial wallet fetch failed: {e}"),
    }
    let wallet_task = Arc::clone(&wallet).spawn_listener(realtime.subscribe());

    // ── Step 6: Stream events until shutdown ─────────────────────
    let mut events = realtime.subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
            event = events.recv() => match event {
                Ok(event) => {
                    // A freshly created chat room must be joined explicitly
                    // to start receiving its messages.
                    if let ServerEvent::ChatRoomCreated(data) = &event {
                        if let Some(room) = data.get("roomId").and_then(|v| v.as_str()) {
                            realtime
                                .emit(ClientEvent::ChatJoinRoom { room: room.to_string() })
                                .await;
                        }
                    }
                    report_event(&event, &feed);
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event stream lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    // ── Step 7: Graceful teardown ────────────────────────────────
    realtime.disconnect().await;
    feed_task.abort();
    wallet_task.abort();
    tracing::info!("MentorLink client shut down gracefully");
    Ok(())
}

/// Log one pushed event at a human-friendly level.
fn report_event(event: &ServerEvent, feed: &NotificationFeed) {
    match event {
        ServerEvent::NewNotification(notification) => {
            let snapshot = feed.snapshot();
            tracing::info!(
                title = %notification.title,
                unread = snapshot.unread_count,
                "New notification"
            );
        }
        ServerEvent::WalletUpdate { reason } => {
            tracing::info!(%reason, "Wallet update");
        }
        ServerEvent::SessionUpdated(_) | ServerEvent::SessionRequestUpdate(_) => {
            tracing::info!(event = event.event_name(), "Session activity");
        }
        other => {
            tracing::debug!(event = other.event_name(), "Dashboard event");
        }
    }
}
