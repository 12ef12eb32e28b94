//! Root route: forwards to the feed or the login screen.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use social::store::auth::AuthState;

use crate::util::auth::home_route;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = auth.get();
        if !state.loading {
            navigate(home_route(&state), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <div class="page-loading">
            <div class="spinner"></div>
        </div>
    }
}
