//! Session lifecycle: bootstrap, login, logout, realtime room join.

use mentorlink_auth::AuthOutcome;
use mentorlink_realtime::{RealtimeClient, Room};

use crate::helpers::{self, GOOD_PASSWORD};

#[tokio::test]
async fn test_bootstrap_without_token_is_terminal_unauthenticated() {
    let backend = helpers::spawn_backend("mentee").await;
    let session = backend.session(helpers::empty_store());

    let state = session.bootstrap().await;
    assert!(!state.is_authenticated());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_bootstrap_with_expired_token_clears_credentials() {
    let backend = helpers::spawn_backend("mentee").await;
    let expired = helpers::make_token(backend.user_id, "mentee", -60);
    let store = helpers::store_with_token(&expired).await;
    let session = backend.session(store.clone());

    let state = session.bootstrap().await;
    assert!(!state.is_authenticated());

    use mentorlink_store::CredentialStore;
    assert_eq!(store.get("auth_token").await.unwrap(), None);
}

#[tokio::test]
async fn test_bootstrap_with_valid_token_restores_session() {
    let backend = helpers::spawn_backend("mentor").await;
    let store = helpers::store_with_token(&backend.token).await;
    let session = backend.session(store);

    let state = session.bootstrap().await;
    let profile = state.profile().expect("session should be restored");
    assert_eq!(profile.id, backend.user_id);
    assert_eq!(profile.name, "Ada");
    assert_eq!(state.token(), Some(backend.token.as_str()));
}

#[tokio::test]
async fn test_bootstrap_fails_closed_when_server_rejects_token() {
    let backend = helpers::spawn_backend("mentee").await;
    // Fresh-looking token the backend does not recognize.
    let unknown = helpers::make_token(backend.user_id, "mentee", 3_600) + "x";
    let store = helpers::store_with_token(&unknown).await;
    let session = backend.session(store.clone());

    let state = session.bootstrap().await;
    assert!(!state.is_authenticated());

    use mentorlink_store::CredentialStore;
    assert_eq!(store.get("auth_token").await.unwrap(), None);
}

#[tokio::test]
async fn test_login_persists_token_and_profile() {
    let backend = helpers::spawn_backend("mentee").await;
    let store = helpers::empty_store();
    let session = backend.session(store.clone());

    let outcome = session.login("ada@example.com", GOOD_PASSWORD).await;
    assert!(outcome.is_success());
    assert!(session.is_authenticated());

    use mentorlink_store::CredentialStore;
    assert_eq!(
        store.get("auth_token").await.unwrap(),
        Some(backend.token.clone())
    );
    // The cached profile blob rides along with the token.
    assert!(store.get("cached_user").await.unwrap().is_some());
}

#[tokio::test]
async fn test_login_rejection_surfaces_server_message() {
    let backend = helpers::spawn_backend("mentee").await;
    let session = backend.session(helpers::empty_store());

    match session.login("ada@example.com", "wrong").await {
        AuthOutcome::Rejected { message } => assert_eq!(message, "Invalid credentials"),
        AuthOutcome::Success(_) => panic!("login should have been rejected"),
    }
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_state_and_persisted_token() {
    let backend = helpers::spawn_backend("mentee").await;
    let store = helpers::empty_store();
    let session = backend.session(store.clone());

    assert!(session.login("ada@example.com", GOOD_PASSWORD).await.is_success());
    session.logout().await;

    assert!(!session.is_authenticated());
    use mentorlink_store::CredentialStore;
    assert_eq!(store.get("auth_token").await.unwrap(), None);
    assert_eq!(store.get("cached_user").await.unwrap(), None);
}

#[tokio::test]
async fn test_login_connect_join_emits_exact_room_name() {
    let mut backend = helpers::spawn_backend("mentor").await;
    let session = backend.session(helpers::empty_store());

    let profile = match session.login("ada@example.com", GOOD_PASSWORD).await {
        AuthOutcome::Success(profile) => profile,
        AuthOutcome::Rejected { message } => panic!("login rejected: {message}"),
    };

    let realtime = RealtimeClient::new(backend.realtime_config());
    realtime
        .connect(session.current().token().map(String::from))
        .await
        .unwrap();
    let room = Room::for_user(profile.role, profile.id).expect("mentors have a dashboard room");
    realtime.join(room).await;

    let frame = backend.next_frame().await;
    assert_eq!(frame["event"], "join_mentor_room");
    assert_eq!(frame["data"], format!("mentor_{}", backend.user_id));

    realtime.disconnect().await;
}

#[tokio::test]
async fn test_room_is_rejoined_after_reconnect() {
    let mut backend = helpers::spawn_backend("mentee").await;
    let session = backend.session(helpers::store_with_token(&backend.token).await);
    let state = session.bootstrap().await;
    let profile = state.profile().cloned().unwrap();

    let realtime = RealtimeClient::new(backend.realtime_config());
    realtime.connect(state.token().map(String::from)).await.unwrap();
    realtime
        .join(Room::for_user(profile.role, profile.id).unwrap())
        .await;

    let first = backend.next_frame().await;
    assert_eq!(first["event"], "join_mentee_room");

    // Drop the server side; the client must reconnect and re-emit the
    // join, since server-side membership did not survive.
    backend.kick.send(()).unwrap();
    let second = backend.next_frame().await;
    assert_eq!(second["event"], "join_mentee_room");
    assert_eq!(second["data"], format!("mentee_{}", backend.user_id));

    realtime.disconnect().await;
}
