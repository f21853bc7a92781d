//! Wallet refetch-on-event.
//!
//! The `reason` carried by `wallet:update` is informational only — it
//! feeds toast/log text and nothing else. Every reason triggers the same
//! full refetch, so a missed or duplicated event can never make the
//! displayed balance drift from the server ledger through bad local
//! arithmetic.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use mentorlink_api::ApiClient;
use mentorlink_core::result::AppResult;
use mentorlink_entity::wallet::{Wallet, WalletUpdateReason};
use mentorlink_realtime::ServerEvent;

/// Spawn a task that invokes `refetch` once per `wallet:update` event.
pub fn spawn_wallet_listener<F, Fut>(
    mut events: broadcast::Receiver<ServerEvent>,
    mut refetch: F,
) -> JoinHandle<()>
where
    F: FnMut(WalletUpdateReason) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ServerEvent::WalletUpdate { reason }) => {
                    info!(%reason, "Wallet changed server-side; refetching");
                    refetch(reason).await;
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // A dropped event leaves the balance stale until the
                    // next event or manual refresh; it can never corrupt
                    // it, since no arithmetic happens client-side.
                    warn!(skipped, "Wallet listener lagged; events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!("Wallet listener stopped");
    })
}

/// Convenience wrapper holding the latest wallet snapshot.
///
/// Its refetch callback is `GET /wallet`; observers read balances from
/// the published snapshot.
#[derive(Debug)]
pub struct WalletSync {
    /// REST client for the wallet endpoints.
    api: ApiClient,
    /// Latest known wallet, none before the first successful refresh.
    state: watch::Sender<Option<Wallet>>,
}

impl WalletSync {
    /// Create a sync with no wallet loaded yet.
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(None);
        Self { api, state }
    }

    /// Subscribe to wallet snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Option<Wallet>> {
        self.state.subscribe()
    }

    /// Latest known wallet, if any.
    pub fn snapshot(&self) -> Option<Wallet> {
        *self.state.borrow()
    }

    /// Fetch the authoritative balances and publish them.
    pub async fn refresh(&self) -> AppResult<Wallet> {
        let wallet = self.api.wallet().await?;
        self.state.send_replace(Some(wallet));
        Ok(wallet)
    }

    /// Spawn the listener that refreshes this sync on wallet events.
    ///
    /// A failed refetch is logged and surfaced as an unchanged snapshot;
    /// the next event (or a manual [`Self::refresh`]) tries again.
    pub fn spawn_listener(
        self: Arc<Self>,
        events: broadcast::Receiver<ServerEvent>,
    ) -> JoinHandle<()> {
        let sync = self;
        spawn_wallet_listener(events, move |reason| {
            let sync = Arc::clone(&sync);
            async move {
                if let Err(err) = sync.refresh().await {
                    warn!("Wallet refetch after '{reason}' failed: {err}");
                }
            }
        })
    }
}
