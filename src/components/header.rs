//! Top bar: brand, signed-in identity and session actions.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::ConsoleClient;
use crate::state::auth;
use crate::state::credentials::CredentialStore;
use crate::state::session::{Session, SessionPhase};
use crate::util::storage::KeyValueStore;

/// Username and email to show, blank unless a full record is stored.
fn shown_identity<S: KeyValueStore>(credentials: &CredentialStore<S>) -> (String, String) {
    credentials
        .read_record()
        .map(|record| (record.username, record.email))
        .unwrap_or_default()
}

/// Header shown on every page.
///
/// Signed in: username, email and a logout button. Otherwise login and
/// signup links. Identity is re-read from storage whenever the session
/// signal fires, so profile edits show up after the page notifies it.
#[component]
pub fn Header() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let identity = {
        let client = client.clone();
        Memo::new(move |_| {
            session.track();
            shown_identity(client.credentials())
        })
    };

    // The route gate sends gated pages to /login once the session drops.
    let on_logout = move |_: leptos::ev::MouseEvent| session.update(|s| auth::logout(client.credentials(), s));

    view! {
        <header class="header">
            <A href="/" attr:class="header__brand">"IAAS Firecracker"</A>
            <span class="header__spacer"></span>
            <Show
                when=move || session.get().is_logged_in()
                fallback=|| {
                    view! {
                        <nav class="header__links">
                            <A href="/login" attr:class="btn">"Log in"</A>
                            <A href="/signup" attr:class="btn btn--primary">"Sign up"</A>
                        </nav>
                    }
                }
            >
                {
                    let on_logout = on_logout.clone();
                    view! {
                        <div class="header__identity">
                            <span class="header__username">{move || identity.get().0}</span>
                            <span class="header__email">{move || identity.get().1}</span>
                            <Show when=move || session.get().phase() == SessionPhase::Admin>
                                <span class="badge badge--admin">"Admin"</span>
                            </Show>
                        </div>
                        <button class="btn" on:click=on_logout>"Log out"</button>
                    }
                }
            </Show>
        </header>
    }
}
