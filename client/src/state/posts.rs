//! Feed driver: fetch, compose, and like against the shared posts signal.

use leptos::prelude::*;
use social::api::SocialApi;
use social::store::posts::PostsState;

use crate::net::api::BrowserApi;

/// Replace the feed with the server's list.
///
/// A response that arrives after a newer fetch (or a reset) is dropped.
pub async fn fetch_posts(posts: RwSignal<PostsState>) {
    let Some(ticket) = posts.try_update(PostsState::begin_fetch) else {
        return;
    };
    let result = BrowserApi::from_build_env().fetch_posts().await;
    if let Some(Err(e)) = posts.try_update(|s| s.finish_fetch(ticket, result)) {
        log::warn!("feed fetch failed: {e}");
    }
}

/// Publish `message`; returns true when the post was created.
///
/// A create that resolves after the feed was reset is dropped.
pub async fn create_post(posts: RwSignal<PostsState>, message: String) -> bool {
    let Some(ticket) = posts.try_update(PostsState::begin_create) else {
        return false;
    };
    let result = BrowserApi::from_build_env().create_post(message.trim()).await;
    match posts.try_update(|s| s.finish_create(ticket, result)) {
        Some(Ok(())) => true,
        Some(Err(e)) => {
            log::warn!("create post failed: {e}");
            false
        }
        None => false,
    }
}

/// Flip the current user's like on `post_id` using the server's counts.
pub async fn toggle_like(posts: RwSignal<PostsState>, post_id: String) {
    let Some(ticket) = posts.try_update(PostsState::begin_toggle) else {
        return;
    };
    let result = BrowserApi::from_build_env().toggle_like(&post_id).await;
    if let Some(Err(e)) = posts.try_update(|s| s.finish_toggle(ticket, &post_id, result)) {
        log::warn!("toggle like failed: {e}");
    }
}
