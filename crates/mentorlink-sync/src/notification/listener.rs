//! Routes pushed notifications from the realtime channel into the feed.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use mentorlink_realtime::ServerEvent;

use super::feed::NotificationFeed;

/// Spawn the listener task.
///
/// The task runs until the event channel closes (realtime client
/// dropped). Lagging behind the broadcast buffer loses push events; that
/// is tolerated because the next full fetch resets truth.
pub fn spawn_notification_listener(
    feed: Arc<NotificationFeed>,
    mut events: broadcast::Receiver<ServerEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ServerEvent::NewNotification(notification)) => {
                    debug!(id = %notification.id, "Push notification received");
                    feed.apply_push(notification);
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Notification listener lagged; pushes dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!("Notification listener stopped");
    })
}
