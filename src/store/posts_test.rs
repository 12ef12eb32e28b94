use super::*;
use crate::test_support::{FakeApi, post};

fn seeded() -> (PostsStore<FakeApi>, FakeApi) {
    let api = FakeApi::new().with_posts(vec![post("2", "second"), post("1", "first")]);
    (PostsStore::new(api.clone()), api)
}

fn messages(store: &PostsStore<FakeApi>) -> Vec<&str> {
    store.posts().iter().map(|p| p.message.as_str()).collect()
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn posts_state_defaults() {
    let s = PostsState::default();
    assert!(s.posts.is_empty());
    assert!(!s.loading);
    assert!(s.error.is_none());
}

// =============================================================
// fetch_posts
// =============================================================

#[tokio::test]
async fn fetch_posts_replaces_list() {
    let (mut store, _) = seeded();

    store.fetch_posts().await.unwrap();

    assert_eq!(messages(&store), vec!["second", "first"]);
    assert!(!store.state().loading);
    assert!(store.state().error.is_none());
}

#[tokio::test]
async fn fetch_posts_failure_keeps_previous_list() {
    let (mut store, api) = seeded();
    store.fetch_posts().await.unwrap();
    let before = store.posts().to_vec();
    api.fail_next(ApiError::Network("connection refused".to_owned()));

    assert!(store.fetch_posts().await.is_err());

    assert_eq!(store.posts(), before.as_slice());
    assert!(!store.state().loading);
    assert_eq!(store.state().error.as_deref(), Some("connection refused"));
}

#[tokio::test]
async fn fetch_posts_failure_without_message_uses_fallback() {
    let (mut store, api) = seeded();
    api.fail_next(ApiError::from_status(500, ""));

    assert!(store.fetch_posts().await.is_err());
    assert_eq!(store.state().error.as_deref(), Some(FETCH_FALLBACK));
}

#[test]
fn stale_fetch_result_is_discarded() {
    let mut state = PostsState::default();
    let older = state.begin_fetch();
    let newer = state.begin_fetch();

    state.finish_fetch(older, Ok(vec![post("old", "stale")])).unwrap();
    assert!(state.posts.is_empty());
    assert!(state.loading);

    state.finish_fetch(newer, Ok(vec![post("new", "fresh")])).unwrap();
    assert_eq!(state.posts.len(), 1);
    assert_eq!(state.posts[0].message, "fresh");
    assert!(!state.loading);
}

#[test]
fn reset_invalidates_in_flight_fetch() {
    let mut state = PostsState::default();
    let ticket = state.begin_fetch();
    state.reset();

    state.finish_fetch(ticket, Ok(vec![post("1", "late")])).unwrap();
    assert!(state.posts.is_empty());
    assert!(!state.loading);
}

#[test]
fn begin_fetch_clears_previous_error_and_sets_loading() {
    let mut state = PostsState { error: Some("Failed to load posts".to_owned()), ..PostsState::default() };

    let _ = state.begin_fetch();

    assert!(state.error.is_none());
    assert!(state.loading);
}

#[tokio::test]
async fn fetch_after_failure_clears_error() {
    let (mut store, api) = seeded();
    api.fail_next(ApiError::Network("down".to_owned()));
    assert!(store.fetch_posts().await.is_err());

    store.fetch_posts().await.unwrap();

    assert!(store.state().error.is_none());
    assert_eq!(messages(&store), vec!["second", "first"]);
}

// =============================================================
// create_post
// =============================================================

#[test]
fn begin_create_clears_previous_error_and_sets_loading() {
    let mut state = PostsState { error: Some("Failed to create post".to_owned()), ..PostsState::default() };

    let _ = state.begin_create();

    assert!(state.error.is_none());
    assert!(state.loading);
}

#[tokio::test]
async fn create_after_failed_fetch_clears_error() {
    let (mut store, api) = seeded();
    api.fail_next(ApiError::Network("down".to_owned()));
    assert!(store.fetch_posts().await.is_err());

    store.create_post("x").await.unwrap();

    assert!(store.state().error.is_none());
    assert!(!store.state().loading);
    assert_eq!(messages(&store), vec!["x"]);
}

#[test]
fn reset_invalidates_in_flight_create() {
    let mut state = PostsState::default();
    let ticket = state.begin_create();
    state.reset();

    state.finish_create(ticket, Ok(post("9", "late"))).unwrap();
    assert!(state.posts.is_empty());
    assert!(!state.loading);

    let failed = state.begin_create();
    state.reset();
    assert!(state.finish_create(failed, Err(ApiError::Network("down".to_owned()))).is_err());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn create_post_prepends_in_newest_first_order() {
    let mut store = PostsStore::new(FakeApi::new());

    store.create_post("A").await.unwrap();
    assert_eq!(messages(&store), vec!["A"]);

    store.create_post("B").await.unwrap();
    assert_eq!(messages(&store), vec!["B", "A"]);
    assert!(!store.state().loading);
}

#[tokio::test]
async fn create_post_keeps_previous_list_as_suffix() {
    let (mut store, _) = seeded();
    store.fetch_posts().await.unwrap();
    let before = store.posts().to_vec();

    store.create_post("hello").await.unwrap();

    assert_eq!(store.posts()[0].message, "hello");
    assert_eq!(&store.posts()[1..], before.as_slice());
}

#[tokio::test]
async fn create_post_sends_trimmed_message() {
    let (mut store, api) = seeded();

    store.create_post("  spaced out \n").await.unwrap();

    assert!(api.calls().contains(&"create_post spaced out".to_owned()));
    assert_eq!(store.posts()[0].message, "spaced out");
}

#[tokio::test]
async fn create_post_failure_leaves_list_unchanged() {
    let (mut store, api) = seeded();
    store.fetch_posts().await.unwrap();
    let before = store.posts().to_vec();
    api.fail_next(ApiError::from_status(400, r#"{"message":["message must be shorter"]}"#));

    assert!(store.create_post("x").await.is_err());

    assert_eq!(store.posts(), before.as_slice());
    assert!(!store.state().loading);
    assert_eq!(store.state().error.as_deref(), Some("message must be shorter"));
}

// =============================================================
// toggle_like
// =============================================================

#[tokio::test]
async fn toggle_like_applies_server_values_only_to_target() {
    let (mut store, api) = seeded();
    store.fetch_posts().await.unwrap();
    let untouched = store.state().find("1").cloned().unwrap();
    // Another client liked it meanwhile; the server's count wins over any local math.
    api.set_likes("2", false, 41);

    store.toggle_like("2").await.unwrap();

    let liked = store.state().find("2").unwrap();
    assert!(liked.liked_by_current_user);
    assert_eq!(liked.likes_count, 42);
    assert_eq!(store.state().find("1"), Some(&untouched));
    assert!(!store.state().loading);
}

#[tokio::test]
async fn toggle_like_twice_unlikes() {
    let (mut store, _) = seeded();
    store.fetch_posts().await.unwrap();

    store.toggle_like("1").await.unwrap();
    store.toggle_like("1").await.unwrap();

    let post = store.state().find("1").unwrap();
    assert!(!post.liked_by_current_user);
    assert_eq!(post.likes_count, 0);
}

#[tokio::test]
async fn toggle_like_failure_leaves_post_and_sets_error() {
    let (mut store, api) = seeded();
    store.fetch_posts().await.unwrap();
    let before = store.posts().to_vec();
    api.fail_next(ApiError::Network(String::new()));

    assert!(store.toggle_like("2").await.is_err());

    assert_eq!(store.posts(), before.as_slice());
    assert_eq!(store.state().error.as_deref(), Some(LIKE_FALLBACK));
}

#[test]
fn toggle_never_sets_loading() {
    let mut state = PostsState { error: Some("old".to_owned()), ..PostsState::with_posts(vec![post("1", "a")]) };
    state.begin_toggle();
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn toggle_result_for_unknown_post_is_ignored() {
    let mut state = PostsState::with_posts(vec![post("1", "a")]);
    let ticket = state.begin_toggle();
    state.finish_toggle(ticket, "missing", Ok(LikeToggle { liked: true, likes_count: 5 })).unwrap();
    assert_eq!(state.posts, vec![post("1", "a")]);
}

#[test]
fn reset_invalidates_in_flight_toggle() {
    let mut state = PostsState::with_posts(vec![post("1", "a")]);
    let ticket = state.begin_toggle();
    state.reset();
    state.posts.push(post("1", "a"));

    let err = state.finish_toggle(ticket, "1", Err(ApiError::Network("down".to_owned())));
    assert!(err.is_err());
    assert!(state.error.is_none());

    let ticket = state.begin_toggle();
    state.reset();
    state.posts.push(post("1", "a"));
    state.finish_toggle(ticket, "1", Ok(LikeToggle { liked: true, likes_count: 7 })).unwrap();
    assert_eq!(state.posts, vec![post("1", "a")]);
}

// =============================================================
// clear_error / reset
// =============================================================

#[tokio::test]
async fn clear_error_only_touches_error() {
    let (mut store, api) = seeded();
    store.fetch_posts().await.unwrap();
    api.fail_next(ApiError::Network("down".to_owned()));
    let _ = store.fetch_posts().await;
    let before = store.state().clone();

    store.clear_error();

    assert!(store.state().error.is_none());
    assert_eq!(store.posts(), before.posts.as_slice());
    assert_eq!(store.state().loading, before.loading);
}

#[tokio::test]
async fn reset_empties_store() {
    let (mut store, _) = seeded();
    store.fetch_posts().await.unwrap();

    store.reset();

    assert!(store.posts().is_empty());
    assert!(!store.state().loading);
    assert!(store.state().error.is_none());
}
