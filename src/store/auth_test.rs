use super::*;
use crate::session::{MemoryStorage, load_session, save_session};
use crate::test_support::{FakeApi, PASSWORD, user};

fn store() -> (AuthStore<FakeApi, MemoryStorage>, FakeApi, MemoryStorage) {
    let api = FakeApi::new().with_user(user("1", "ana"));
    let storage = MemoryStorage::new();
    (AuthStore::restore(api.clone(), storage.clone()), api, storage)
}

// =============================================================
// AuthState defaults and phases
// =============================================================

#[test]
fn auth_state_default_is_anonymous() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(state.token.is_none());
    assert!(!state.loading);
    assert_eq!(state.phase(), AuthPhase::Anonymous);
}

#[test]
fn begin_request_clears_previous_error() {
    let mut state = AuthState { error: Some("boom".to_owned()), ..AuthState::default() };
    state.begin_request();
    assert!(state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.phase(), AuthPhase::Authenticating);
}

#[test]
fn failed_login_phase_is_error() {
    let mut state = AuthState::default();
    state.begin_request();
    let _ = state.finish_login(Err(ApiError::Network(String::new())));
    assert_eq!(state.phase(), AuthPhase::Error);
    assert_eq!(state.error.as_deref(), Some(LOGIN_FALLBACK));
}

// =============================================================
// Restore
// =============================================================

#[test]
fn restore_reads_persisted_session() {
    let storage = MemoryStorage::new();
    let persisted = PersistedSession { user: Some(user("1", "ana")), token: Some("t".to_owned()), is_authenticated: true };
    save_session(&storage, &persisted).unwrap();

    let store = AuthStore::restore(FakeApi::new(), storage);
    assert!(store.state().is_authenticated);
    assert_eq!(store.state().token.as_deref(), Some("t"));
    assert!(!store.state().loading);
    assert!(store.state().error.is_none());
}

#[test]
fn restore_incomplete_session_is_anonymous() {
    let storage = MemoryStorage::new();
    let persisted = PersistedSession { user: None, token: Some("t".to_owned()), is_authenticated: true };
    save_session(&storage, &persisted).unwrap();

    let store = AuthStore::restore(FakeApi::new(), storage);
    assert_eq!(store.state(), &AuthState::default());
}

// =============================================================
// login
// =============================================================

#[tokio::test]
async fn login_with_valid_credentials_authenticates() {
    let (mut store, _, storage) = store();

    store.login("ana", PASSWORD).await.unwrap();

    let state = store.state();
    assert!(state.is_authenticated);
    assert_eq!(state.user.as_ref().map(|u| u.alias.as_str()), Some("ana"));
    assert_eq!(state.token.as_deref(), Some("token-ana"));
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(load_session(&storage), state.snapshot());
}

#[tokio::test]
async fn login_with_invalid_credentials_sets_error() {
    let (mut store, _, storage) = store();

    let err = store.login("ana", "wrong").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    let state = store.state();
    assert!(!state.is_authenticated);
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
    assert!(!load_session(&storage).is_authenticated);
}

#[tokio::test]
async fn login_failure_without_message_uses_fallback() {
    let (mut store, api, _) = store();
    api.fail_next(ApiError::from_status(502, "<html>"));

    assert!(store.login("ana", PASSWORD).await.is_err());
    assert_eq!(store.state().error.as_deref(), Some("Failed to login"));
}

#[tokio::test]
async fn login_after_failure_clears_error() {
    let (mut store, _, _) = store();
    let _ = store.login("ana", "wrong").await;

    store.login("ana", PASSWORD).await.unwrap();
    assert!(store.state().error.is_none());
    assert_eq!(store.state().phase(), AuthPhase::Authenticated);
}

// =============================================================
// logout / reset
// =============================================================

#[tokio::test]
async fn logout_clears_session_and_persists() {
    let (mut store, _, storage) = store();
    store.login("ana", PASSWORD).await.unwrap();

    store.logout();

    let state = store.state();
    assert!(state.user.is_none());
    assert!(state.token.is_none());
    assert!(!state.is_authenticated);
    assert!(state.error.is_none());
    assert_eq!(load_session(&storage), PersistedSession::default());
}

#[test]
fn logout_from_any_state_is_anonymous() {
    let mut state = AuthState { loading: false, error: Some("x".to_owned()), ..AuthState::default() };
    state.logout();
    assert!(state.user.is_none());
    assert!(!state.is_authenticated);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn reset_returns_to_initial_state() {
    let (mut store, _, storage) = store();
    store.login("ana", PASSWORD).await.unwrap();

    store.reset();

    assert_eq!(store.state(), &AuthState::default());
    assert_eq!(load_session(&storage), PersistedSession::default());
}

// =============================================================
// update_profile
// =============================================================

#[tokio::test]
async fn update_profile_without_user_is_noop() {
    let (mut store, api, _) = store();

    store.update_profile(&ProfileUpdate { first_name: Some("X".to_owned()), last_name: None }).await.unwrap();

    assert_eq!(store.state(), &AuthState::default());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn update_profile_applies_name_fields_and_persists() {
    let (mut store, _, storage) = store();
    store.login("ana", PASSWORD).await.unwrap();

    let update = ProfileUpdate { first_name: Some("Anita".to_owned()), last_name: Some("Ruiz".to_owned()) };
    store.update_profile(&update).await.unwrap();

    let user = store.state().user.clone().unwrap();
    assert_eq!(user.first_name, "Anita");
    assert_eq!(user.last_name, "Ruiz");
    assert_eq!(user.alias, "ana");
    assert!(!store.state().loading);
    assert_eq!(load_session(&storage).user, Some(user));
}

#[tokio::test]
async fn update_profile_failure_keeps_user_and_sets_error() {
    let (mut store, api, _) = store();
    store.login("ana", PASSWORD).await.unwrap();
    let before = store.state().user.clone();
    api.fail_next(ApiError::Network(String::new()));

    let update = ProfileUpdate { first_name: Some("Anita".to_owned()), last_name: None };
    assert!(store.update_profile(&update).await.is_err());

    assert_eq!(store.state().user, before);
    assert!(!store.state().loading);
    assert_eq!(store.state().error.as_deref(), Some(PROFILE_FALLBACK));
    assert!(store.state().is_authenticated);
}

// =============================================================
// clear_error
// =============================================================

#[tokio::test]
async fn clear_error_only_touches_error() {
    let (mut store, _, _) = store();
    let _ = store.login("ana", "wrong").await;
    let before = store.state().clone();

    store.clear_error();
    store.clear_error();

    assert!(store.state().error.is_none());
    assert_eq!(AuthState { error: None, ..before }, *store.state());
}
