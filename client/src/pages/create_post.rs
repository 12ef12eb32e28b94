//! Compose page for publishing a new post.
//!
//! DESIGN
//! ======
//! The character counter and submit state derive from `check_message`, so the
//! page and the store agree on what counts as a valid message. The page only
//! navigates back to the feed once the server has accepted the post.

#[cfg(test)]
#[path = "create_post_test.rs"]
mod create_post_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use social::format::{ComposeError, MAX_MESSAGE_CHARS, check_message};
use social::store::posts::PostsState;

use crate::components::auth_guard::AuthGuard;
use crate::components::navbar::Navbar;

/// Counter text shown under the compose box.
pub(crate) fn counter_label(raw: &str) -> String {
    format!("{}/{MAX_MESSAGE_CHARS}", raw.chars().count())
}

/// Inline warning for the current draft, if any.
///
/// An empty draft gets no warning; the disabled button is enough.
pub(crate) fn draft_warning(raw: &str) -> Option<String> {
    match check_message(raw) {
        Err(err @ ComposeError::TooLong { .. }) => Some(err.to_string()),
        Ok(_) | Err(ComposeError::Empty) => None,
    }
}

#[component]
pub fn CreatePostPage() -> impl IntoView {
    view! {
        <AuthGuard>
            <Navbar/>
            <Composer/>
        </AuthGuard>
    }
}

#[component]
fn Composer() -> impl IntoView {
    let posts = expect_context::<RwSignal<PostsState>>();
    let navigate = use_navigate();
    let draft = RwSignal::new(String::new());

    on_cleanup(move || posts.update(PostsState::clear_error));

    let busy = move || posts.with(|s| s.loading);
    let invalid = move || draft.with(|d| check_message(d).is_err());
    let warning = move || draft.with(|d| draft_warning(d));
    let error = move || posts.with(|s| s.error.clone());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if posts.with_untracked(|s| s.loading) {
            return;
        }
        let Ok(message) = draft.with_untracked(|d| check_message(d).map(str::to_owned)) else {
            return;
        };
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            // `try_set` hands the value back once the page is gone.
            if crate::state::posts::create_post(posts, message).await && draft.try_set(String::new()).is_none() {
                navigate("/posts", NavigateOptions::default());
            }
        });
    };

    view! {
        <main class="compose">
            <h1>"New Post"</h1>
            <form class="compose__form" on:submit=on_submit>
                <textarea
                    class="compose__input"
                    rows="5"
                    placeholder="What's on your mind?"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                ></textarea>
                <div class="compose__meta">
                    <span class="compose__counter" class:compose__counter--over=move || warning().is_some()>
                        {move || draft.with(|d| counter_label(d))}
                    </span>
                    <Show when=move || warning().is_some()>
                        <span class="compose__warning">{move || warning().unwrap_or_default()}</span>
                    </Show>
                </div>
                <Show when=move || error().is_some()>
                    <p class="compose__error" role="alert">{move || error().unwrap_or_default()}</p>
                </Show>
                <div class="compose__actions">
                    <a class="compose__cancel" href="/posts">"Cancel"</a>
                    <button class="compose__submit" type="submit" disabled=move || busy() || invalid()>
                        {move || if busy() { "Posting..." } else { "Post" }}
                    </button>
                </div>
            </form>
        </main>
    }
}
