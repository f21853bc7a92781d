//! Wallet: refetch-on-event, no local arithmetic.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use serde_json::json;

use mentorlink_entity::user::UserRole;
use mentorlink_realtime::{RealtimeClient, Room};
use mentorlink_sync::WalletSync;

use crate::helpers;

#[tokio::test]
async fn test_payout_event_triggers_exactly_one_refetch() {
    let mut backend = helpers::spawn_backend("mentor").await;
    let realtime = RealtimeClient::new(backend.realtime_config());
    realtime.connect(Some(backend.token.clone())).await.unwrap();

    let wallet = Arc::new(WalletSync::new(backend.api()));
    let initial = wallet.refresh().await.unwrap();
    assert_eq!(initial.available_balance, 5_000);
    assert_eq!(initial.locked_balance, 1_500);
    assert_eq!(backend.wallet_fetches.load(Ordering::SeqCst), 1);

    let listener = Arc::clone(&wallet).spawn_listener(realtime.subscribe());
    let mut snapshots = wallet.subscribe();
    snapshots.mark_unchanged();

    // Wait for the connection to be live before pushing.
    realtime
        .join(Room::for_user(UserRole::Mentor, backend.user_id).unwrap())
        .await;
    backend.next_frame().await;

    backend.push_event("wallet:update", json!({"reason": "PAYOUT"}));

    tokio::time::timeout(Duration::from_secs(5), snapshots.changed())
        .await
        .expect("timed out waiting for the wallet refetch")
        .unwrap();

    // Exactly one refetch for the event: the balance comes from the
    // server verbatim, never from arithmetic on the reason.
    assert_eq!(backend.wallet_fetches.load(Ordering::SeqCst), 2);
    let snapshot = wallet.snapshot().unwrap();
    assert_eq!(snapshot.available_balance, 5_000);
    assert_eq!(snapshot.locked_balance, 1_500);

    // Grace period: no stray extra refetches follow.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(backend.wallet_fetches.load(Ordering::SeqCst), 2);

    realtime.disconnect().await;
    listener.abort();
}

#[tokio::test]
async fn test_non_wallet_events_do_not_touch_the_wallet() {
    let mut backend = helpers::spawn_backend("mentor").await;
    let realtime = RealtimeClient::new(backend.realtime_config());
    realtime.connect(Some(backend.token.clone())).await.unwrap();

    let wallet = Arc::new(WalletSync::new(backend.api()));
    wallet.refresh().await.unwrap();
    let listener = Arc::clone(&wallet).spawn_listener(realtime.subscribe());

    realtime
        .join(Room::for_user(UserRole::Mentor, backend.user_id).unwrap())
        .await;
    backend.next_frame().await;

    backend.push_event("dashboard_update", json!({"sessions": 3}));
    backend.push_event("availability_created", json!({"slot": "mon-9"}));
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(backend.wallet_fetches.load(Ordering::SeqCst), 1);

    realtime.disconnect().await;
    listener.abort();
}
