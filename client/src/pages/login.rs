//! Login page exchanging alias + password for a session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Signed-in users are forwarded to the feed. Server errors come from the auth
//! store; blank fields are rejected locally before any request is made.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use social::store::auth::AuthState;

/// Trim the alias and require both fields.
pub(crate) fn validate_login_input(alias: &str, password: &str) -> Result<(String, String), &'static str> {
    let alias = alias.trim();
    if alias.is_empty() || password.is_empty() {
        return Err("Enter your alias and password.");
    }
    Ok((alias.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let alias = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let local_error = RwSignal::new(None::<&'static str>);

    Effect::new(move || {
        if auth.with(|s| s.is_authenticated) {
            navigate("/posts", NavigateOptions::default());
        }
    });

    on_cleanup(move || crate::state::auth::clear_error(auth));

    let busy = move || auth.with(|s| s.loading);
    let message = move || local_error.get().map(str::to_owned).or_else(|| auth.with(|s| s.error.clone()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.with_untracked(|s| s.loading) {
            return;
        }
        match validate_login_input(&alias.get_untracked(), &password.get_untracked()) {
            Ok((alias_value, password_value)) => {
                local_error.set(None);
                leptos::task::spawn_local(crate::state::auth::login(auth, alias_value, password_value));
            }
            Err(msg) => local_error.set(Some(msg)),
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Social"</h1>
                <p class="login-card__subtitle">"Sign in to your account"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Alias"
                        autocomplete="username"
                        prop:value=move || alias.get()
                        on:input=move |ev| alias.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if busy() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || message().is_some()>
                    <p class="login-message login-message--error">{move || message().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
