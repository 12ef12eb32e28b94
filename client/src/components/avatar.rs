//! Round user avatar with an initials fallback.

use leptos::prelude::*;
use social::format::initials;
use social::types::User;

#[component]
pub fn Avatar(user: User, #[prop(optional)] large: bool) -> impl IntoView {
    let name = user.display_name();
    match user.avatar.filter(|url| !url.trim().is_empty()) {
        Some(url) => view! {
            <img class="avatar" class:avatar--large=large src=url alt=name/>
        }
        .into_any(),
        None => view! {
            <span class="avatar avatar--initials" class:avatar--large=large title=name.clone()>
                {initials(&name)}
            </span>
        }
        .into_any(),
    }
}
