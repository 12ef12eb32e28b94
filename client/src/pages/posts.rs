//! Feed page listing every post, newest first.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated landing route. The feed is fetched each time the page mounts;
//! a failed fetch shows a banner with a retry action above whatever posts are
//! already loaded.

#[cfg(test)]
#[path = "posts_test.rs"]
mod posts_test;

use leptos::prelude::*;
use social::store::posts::PostsState;

use crate::components::auth_guard::AuthGuard;
use crate::components::navbar::Navbar;
use crate::components::post_card::PostCard;

const SKELETON_CARDS: usize = 3;

/// What the feed body should show for the current store state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FeedBody {
    Skeleton,
    Empty,
    Posts,
}

pub(crate) fn feed_body(state: &PostsState) -> FeedBody {
    if !state.posts.is_empty() {
        FeedBody::Posts
    } else if state.loading {
        FeedBody::Skeleton
    } else if state.error.is_some() {
        // The banner already explains the empty list.
        FeedBody::Posts
    } else {
        FeedBody::Empty
    }
}

#[component]
pub fn PostsPage() -> impl IntoView {
    view! {
        <AuthGuard>
            <Navbar/>
            <Feed/>
        </AuthGuard>
    }
}

#[component]
fn Feed() -> impl IntoView {
    let posts = expect_context::<RwSignal<PostsState>>();

    leptos::task::spawn_local(crate::state::posts::fetch_posts(posts));

    let body = move || posts.with(feed_body);
    let error = move || posts.with(|s| s.error.clone());

    let on_retry = move |_: leptos::ev::MouseEvent| {
        leptos::task::spawn_local(crate::state::posts::fetch_posts(posts));
    };

    view! {
        <main class="feed">
            <div class="feed__header">
                <h1>"Feed"</h1>
                <a class="feed__compose" href="/create-post">"New Post"</a>
            </div>
            <Show when=move || error().is_some()>
                <div class="feed__error" role="alert">
                    <span>{move || error().unwrap_or_default()}</span>
                    <button class="feed__retry" on:click=on_retry>"Retry"</button>
                </div>
            </Show>
            <Show when=move || body() == FeedBody::Skeleton>
                {(0..SKELETON_CARDS).map(|_| view! { <div class="post-card post-card--skeleton"></div> }).collect_view()}
            </Show>
            <Show when=move || body() == FeedBody::Empty>
                <p class="feed__empty">"No posts yet. Be the first to share something."</p>
            </Show>
            <For
                each=move || posts.with(|s| s.posts.clone())
                key=|post| (post.id.clone(), post.likes_count, post.liked_by_current_user)
                let:post
            >
                <PostCard post=post/>
            </For>
        </main>
    }
}
