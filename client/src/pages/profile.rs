//! Profile page: view the signed-in user and edit their name.
//!
//! SYSTEM CONTEXT
//! ==============
//! There is no profile endpoint; edits are merged into the stored user and
//! persisted with the session. The edit form closes only after the update
//! succeeds.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use social::format::format_birth_date;
use social::store::auth::AuthState;
use social::types::{ProfileUpdate, User};

use crate::components::auth_guard::AuthGuard;
use crate::components::avatar::Avatar;
use crate::components::navbar::Navbar;

/// Build an update holding only the fields that actually change.
///
/// Blank inputs leave the stored value alone. Returns `None` when nothing
/// would change.
pub(crate) fn build_profile_update(current: &User, first_name: &str, last_name: &str) -> Option<ProfileUpdate> {
    let changed = |input: &str, stored: &str| {
        let input = input.trim();
        (!input.is_empty() && input != stored).then(|| input.to_owned())
    };
    let update = ProfileUpdate {
        first_name: changed(first_name, &current.first_name),
        last_name: changed(last_name, &current.last_name),
    };
    (!update.is_empty()).then_some(update)
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <AuthGuard>
            <Navbar/>
            <ProfileCard/>
        </AuthGuard>
    }
}

#[component]
fn ProfileCard() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let editing = RwSignal::new(false);
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());

    on_cleanup(move || crate::state::auth::clear_error(auth));

    let user = move || auth.with(|s| s.user.clone());
    let busy = move || auth.with(|s| s.loading);
    let error = move || auth.with(|s| s.error.clone());

    let on_edit = move |_: leptos::ev::MouseEvent| {
        if let Some(current) = auth.with_untracked(|s| s.user.clone()) {
            first_name.set(current.first_name);
            last_name.set(current.last_name);
        }
        crate::state::auth::clear_error(auth);
        editing.set(true);
    };

    let on_cancel = move |_: leptos::ev::MouseEvent| {
        crate::state::auth::clear_error(auth);
        editing.set(false);
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.with_untracked(|s| s.loading) {
            return;
        }
        let Some(current) = auth.with_untracked(|s| s.user.clone()) else {
            return;
        };
        let Some(update) = build_profile_update(&current, &first_name.get_untracked(), &last_name.get_untracked())
        else {
            editing.set(false);
            return;
        };
        leptos::task::spawn_local(async move {
            if crate::state::auth::update_profile(auth, update).await {
                let _ = editing.try_set(false);
            }
        });
    };

    view! {
        <main class="profile">
            {move || user().map(|user| {
                let name = user.display_name();
                let handle = format!("@{}", user.alias);
                let birth = format_birth_date(&user.birth_date);
                view! {
                    <section class="profile__card">
                        <Avatar user=user large=true/>
                        <h1 class="profile__name">{name}</h1>
                        <p class="profile__handle">{handle}</p>
                        <p class="profile__birth">"Born " {birth}</p>
                    </section>
                }
            })}
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <button class="profile__edit" on:click=on_edit>"Edit Profile"</button>
                }
            >
                <form class="profile__form" on:submit=on_save>
                    <label class="profile__label">
                        "First name"
                        <input
                            class="profile__input"
                            type="text"
                            prop:value=move || first_name.get()
                            on:input=move |ev| first_name.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="profile__label">
                        "Last name"
                        <input
                            class="profile__input"
                            type="text"
                            prop:value=move || last_name.get()
                            on:input=move |ev| last_name.set(event_target_value(&ev))
                        />
                    </label>
                    <div class="profile__actions">
                        <button class="profile__cancel" type="button" on:click=on_cancel>"Cancel"</button>
                        <button class="profile__save" type="submit" disabled=busy>
                            {move || if busy() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Show>
            <Show when=move || error().is_some()>
                <p class="profile__error" role="alert">{move || error().unwrap_or_default()}</p>
            </Show>
        </main>
    }
}
