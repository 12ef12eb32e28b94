//! Auth-session driver for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The session is written to `localStorage`
//! synchronously after each transition so the HTTP transport sees the new
//! token on its very next request.

use leptos::prelude::*;
use social::api::SocialApi;
use social::session::{load_session, save_session};
use social::store::auth::AuthState;
use social::store::posts::PostsState;
use social::types::ProfileUpdate;

use crate::net::api::BrowserApi;
use crate::util::storage::LocalStorage;

/// Initial auth state rebuilt from `localStorage`.
pub fn restore() -> AuthState {
    AuthState::from(load_session(&LocalStorage))
}

fn persist(auth: RwSignal<AuthState>) {
    let Some(session) = auth.try_with_untracked(AuthState::snapshot) else {
        return;
    };
    if let Err(e) = save_session(&LocalStorage, &session) {
        log::warn!("session persist failed: {e}");
    }
}

/// Exchange credentials for a session.
pub async fn login(auth: RwSignal<AuthState>, alias: String, password: String) {
    auth.update(AuthState::begin_request);
    let result = BrowserApi::from_build_env().login(&alias, &password).await;
    let outcome = auth.try_update(|s| s.finish_login(result));
    match outcome {
        Some(Ok(())) => log::info!("signed in as {alias}"),
        Some(Err(e)) => log::warn!("login failed: {e}"),
        None => return,
    }
    persist(auth);
}

/// Drop the session and any feed state tied to it.
pub fn logout(auth: RwSignal<AuthState>, posts: RwSignal<PostsState>) {
    auth.update(AuthState::logout);
    persist(auth);
    posts.update(PostsState::reset);
}

/// Apply a profile edit for the signed-in user.
///
/// Does nothing when no user is signed in. Returns true on success.
pub async fn update_profile(auth: RwSignal<AuthState>, update: ProfileUpdate) -> bool {
    let Some(current) = auth.with_untracked(|s| s.user.clone()) else {
        return false;
    };
    auth.update(AuthState::begin_request);
    let result = BrowserApi::from_build_env().update_profile(&current, &update).await;
    let Some(outcome) = auth.try_update(|s| s.finish_profile_update(result)) else {
        return false;
    };
    persist(auth);
    if let Err(e) = &outcome {
        log::warn!("profile update failed: {e}");
    }
    outcome.is_ok()
}

pub fn clear_error(auth: RwSignal<AuthState>) {
    auth.update(AuthState::clear_error);
}
