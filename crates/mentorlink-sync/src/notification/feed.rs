//! The notification feed: fetch, live pushes, optimistic mutations.
//!
//! A full fetch replaces local state wholesale and is the feed's
//! source-of-truth reset point. Push events layer on top without dedupe —
//! a notification that arrives by push and again in a later fetch is
//! reconciled by that fetch. Optimistic mutations (mark-read, mark-all,
//! delete) mutate local state first and are never rolled back on server
//! failure; the error propagates to the caller and the next fetch resets
//! truth.

use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use mentorlink_api::ApiClient;
use mentorlink_core::result::AppResult;
use mentorlink_entity::notification::Notification;
use mentorlink_entity::user::UserRole;

/// Lifecycle of the feed subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedPhase {
    /// No fetch has run yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The feed is live. Push-driven mutations do not leave this phase.
    Ready,
    /// The last fetch failed; retry is manual, never automatic.
    Failed(String),
}

/// Snapshot published to observers after every mutation.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// Subscription phase.
    pub phase: FeedPhase,
    /// Notifications, newest first.
    pub items: Vec<Notification>,
    /// Derived unread count, floored at zero.
    pub unread_count: u64,
}

impl FeedSnapshot {
    fn empty() -> Self {
        Self {
            phase: FeedPhase::Idle,
            items: Vec::new(),
            unread_count: 0,
        }
    }
}

/// Merges the REST-fetched notification list with live push events.
#[derive(Debug)]
pub struct NotificationFeed {
    /// REST client for notification endpoints.
    api: ApiClient,
    /// Published feed state.
    state: watch::Sender<FeedSnapshot>,
}

impl NotificationFeed {
    /// Create an idle feed.
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(FeedSnapshot::empty());
        Self { api, state }
    }

    /// Subscribe to feed snapshots.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.state.subscribe()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.borrow().clone()
    }

    /// Fetch the full list for `role` and replace local state wholesale.
    ///
    /// On failure the feed enters [`FeedPhase::Failed`] and the error is
    /// returned for display; nothing retries automatically.
    pub async fn fetch(&self, role: UserRole) -> AppResult<()> {
        self.state
            .send_modify(|snapshot| snapshot.phase = FeedPhase::Loading);

        match self.api.list_notifications(role).await {
            Ok(list) => {
                debug!(
                    count = list.notifications.len(),
                    unread = list.unread_count,
                    "Notification feed replaced from fetch"
                );
                self.state.send_modify(|snapshot| {
                    snapshot.items = list.notifications;
                    snapshot.unread_count = list.unread_count;
                    snapshot.phase = FeedPhase::Ready;
                });
                Ok(())
            }
            Err(err) => {
                self.state
                    .send_modify(|snapshot| snapshot.phase = FeedPhase::Failed(err.message.clone()));
                Err(err)
            }
        }
    }

    /// Apply a pushed notification: prepend and count it as unread.
    ///
    /// No dedupe against existing ids happens here; the next
    /// [`Self::fetch`] is the reconciliation point.
    pub fn apply_push(&self, notification: Notification) {
        self.state.send_modify(|snapshot| {
            snapshot.items.insert(0, notification);
            snapshot.unread_count += 1;
        });
    }

    /// Optimistically mark one notification read, then tell the server.
    ///
    /// Already-read or unknown ids are complete no-ops (the counter can
    /// only drop once per id between fetches) and skip the network call.
    /// A failed server call propagates but local state stays mutated.
    pub async fn mark_as_read(&self, id: Uuid) -> AppResult<()> {
        let mut flipped = false;
        self.state.send_modify(|snapshot| {
            if let Some(item) = snapshot.items.iter_mut().find(|n| n.id == id) {
                if !item.is_read {
                    item.is_read = true;
                    snapshot.unread_count = snapshot.unread_count.saturating_sub(1);
                    flipped = true;
                }
            }
        });

        if !flipped {
            return Ok(());
        }
        self.api.mark_notification_read(id).await
    }

    /// Optimistically mark everything read and zero the counter.
    ///
    /// An empty list is a no-op without error and without a network call.
    pub async fn mark_all_read(&self) -> AppResult<()> {
        let mut was_empty = true;
        self.state.send_modify(|snapshot| {
            was_empty = snapshot.items.is_empty();
            for item in &mut snapshot.items {
                item.is_read = true;
            }
            snapshot.unread_count = 0;
        });

        if was_empty {
            return Ok(());
        }
        self.api.mark_all_notifications_read().await
    }

    /// Remove a notification locally by id, then tell the server.
    ///
    /// Deleting a still-unread item also drops the unread count so the
    /// derived counter stays consistent with the visible list.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut existed = false;
        self.state.send_modify(|snapshot| {
            if let Some(index) = snapshot.items.iter().position(|n| n.id == id) {
                let removed = snapshot.items.remove(index);
                if !removed.is_read {
                    snapshot.unread_count = snapshot.unread_count.saturating_sub(1);
                }
                existed = true;
            }
        });

        if !existed {
            return Ok(());
        }
        self.api.delete_notification(id).await
    }
}
