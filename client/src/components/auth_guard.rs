//! Wrapper for routes that require a signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded pages render their content only while a session exists. Once auth
//! settles without one the guard navigates to `/login`; while a login request
//! is pending it shows a spinner instead.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use social::store::auth::AuthState;

use crate::util::auth::install_unauth_redirect;

#[component]
pub fn AuthGuard(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    view! {
        <Show
            when=move || auth.with(|s| s.is_authenticated)
            fallback=|| view! {
                <div class="page-loading">
                    <div class="spinner"></div>
                </div>
            }
        >
            {children()}
        </Show>
    }
}
