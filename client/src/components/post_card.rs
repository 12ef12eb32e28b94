//! Feed card for a single post with its like control.

use leptos::prelude::*;
use social::format::{likes_label, relative_time};
use social::store::posts::PostsState;
use social::types::Post;
use time::OffsetDateTime;

use crate::components::avatar::Avatar;

#[component]
pub fn PostCard(post: Post) -> impl IntoView {
    let posts = expect_context::<RwSignal<PostsState>>();
    let liking = RwSignal::new(false);

    let author = post.user.display_name();
    let handle = format!("@{}", post.user.alias);
    let when = relative_time(&post.created_at, OffsetDateTime::now_utc());
    let liked = post.liked_by_current_user;
    let label = likes_label(post.likes_count);
    let post_id = post.id.clone();

    let on_like = move |_: leptos::ev::MouseEvent| {
        if liking.get_untracked() {
            return;
        }
        liking.set(true);
        let post_id = post_id.clone();
        leptos::task::spawn_local(async move {
            crate::state::posts::toggle_like(posts, post_id).await;
            let _ = liking.try_set(false);
        });
    };

    view! {
        <article class="post-card">
            <header class="post-card__header">
                <Avatar user=post.user/>
                <div class="post-card__meta">
                    <span class="post-card__author">{author}</span>
                    <span class="post-card__handle">{handle}</span>
                    <span class="post-card__time">{when}</span>
                </div>
            </header>
            <p class="post-card__message">{post.message}</p>
            <footer class="post-card__footer">
                <button
                    class="post-card__like"
                    class:post-card__like--active=liked
                    disabled=move || liking.get()
                    on:click=on_like
                >
                    {if liked { "♥" } else { "♡" }}
                </button>
                <span class="post-card__likes">{label}</span>
            </footer>
        </article>
    }
}
