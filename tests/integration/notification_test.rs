//! Notification feed: fetch, wire-to-feed push flow, fetch-as-reset.

use std::sync::Arc;

use serde_json::json;

use mentorlink_entity::user::UserRole;
use mentorlink_realtime::RealtimeClient;
use mentorlink_sync::{FeedPhase, NotificationFeed, spawn_notification_listener};

use crate::helpers;

#[tokio::test]
async fn test_fetch_populates_list_and_unread_count() {
    let backend = helpers::spawn_backend("mentee").await;
    let feed = NotificationFeed::new(backend.api());

    feed.fetch(UserRole::Mentee).await.unwrap();
    let snapshot = feed.snapshot();
    assert_eq!(snapshot.phase, FeedPhase::Ready);
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.unread_count, 1);
    assert_eq!(snapshot.items[0].title, "Session confirmed");
}

#[tokio::test]
async fn test_pushed_event_flows_from_wire_into_feed() {
    let mut backend = helpers::spawn_backend("mentee").await;
    let realtime = RealtimeClient::new(backend.realtime_config());
    realtime.connect(Some(backend.token.clone())).await.unwrap();

    let feed = Arc::new(NotificationFeed::new(backend.api()));
    feed.fetch(UserRole::Mentee).await.unwrap();
    let listener = spawn_notification_listener(Arc::clone(&feed), realtime.subscribe());

    let mut snapshots = feed.subscribe();
    snapshots.mark_unchanged();

    // Let the client finish connecting before pushing: join a room and
    // wait for its frame to arrive at the server.
    realtime
        .join(
            mentorlink_realtime::Room::for_user(UserRole::Mentee, backend.user_id).unwrap(),
        )
        .await;
    backend.next_frame().await;

    backend.push_event(
        "new_notification",
        json!({
            "id": "bbbbbbbb-0000-0000-0000-000000000003",
            "title": "New challenge reply",
            "type": "challenge",
            "isRead": false,
            "createdAt": "2024-06-11T09:00:00Z"
        }),
    );

    tokio::time::timeout(std::time::Duration::from_secs(5), snapshots.changed())
        .await
        .expect("timed out waiting for the push to land")
        .unwrap();

    let snapshot = feed.snapshot();
    // Exactly one more unread, new item at the head, phase untouched.
    assert_eq!(snapshot.unread_count, 2);
    assert_eq!(snapshot.items.len(), 3);
    assert_eq!(snapshot.items[0].title, "New challenge reply");
    assert_eq!(snapshot.phase, FeedPhase::Ready);

    // A full fetch is the reconciliation point: state is replaced
    // wholesale from the server.
    feed.fetch(UserRole::Mentee).await.unwrap();
    let snapshot = feed.snapshot();
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.unread_count, 1);

    realtime.disconnect().await;
    listener.abort();
}
