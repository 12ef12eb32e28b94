//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use social::store::posts::PostsState;

use crate::pages::{
    create_post::CreatePostPage, home::HomePage, login::LoginPage, posts::PostsPage, profile::ProfilePage,
};

/// Root application component.
///
/// Restores the persisted session, provides both stores as context, and sets
/// up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(crate::state::auth::restore());
    let posts = RwSignal::new(PostsState::default());

    provide_context(auth);
    provide_context(posts);

    view! {
        <Title text="Social network"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("posts") view=PostsPage/>
                <Route path=StaticSegment("create-post") view=CreatePostPage/>
                <Route path=StaticSegment("profile") view=ProfilePage/>
            </Routes>
        </Router>
    }
}
