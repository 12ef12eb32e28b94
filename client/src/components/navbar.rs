//! Top navigation bar shown on every signed-in page.
//!
//! DESIGN
//! ======
//! Link highlighting is derived from the router location; logout resets both
//! stores and returns to the login screen.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use social::store::auth::AuthState;
use social::store::posts::PostsState;

use crate::components::avatar::Avatar;

/// CSS class for a nav link, marking the one matching the current path.
pub fn nav_link_class(pathname: &str, target: &str) -> &'static str {
    let current = pathname.trim_end_matches('/');
    let current = if current.is_empty() { "/" } else { current };
    if current == target { "navbar__link navbar__link--active" } else { "navbar__link" }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let posts = expect_context::<RwSignal<PostsState>>();
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    let link_class = move |target: &'static str| move || pathname.with(|path| nav_link_class(path, target));

    let on_logout = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        crate::state::auth::logout(auth, posts);
        navigate("/login", NavigateOptions::default());
    };

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/posts">"Social"</a>
            <div class="navbar__links">
                <a class=link_class("/posts") href="/posts">"Feed"</a>
                <a class=link_class("/create-post") href="/create-post">"New Post"</a>
                <a class=link_class("/profile") href="/profile">"Profile"</a>
            </div>
            <div class="navbar__user">
                {move || auth.with(|s| s.user.clone()).map(|user| {
                    let name = user.display_name();
                    view! {
                        <Avatar user=user/>
                        <span class="navbar__name">{name}</span>
                    }
                })}
                <a class="navbar__logout" href="/login" on:click=on_logout>"Log out"</a>
            </div>
        </nav>
    }
}
