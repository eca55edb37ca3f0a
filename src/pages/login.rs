//! Email/password login.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::form::{ErrorLine, TextField};
use crate::net::ConsoleClient;
use crate::net::error::ApiError;
use crate::net::types::LoginRequest;
use crate::net::users;
use crate::state::auth;
use crate::state::session::Session;
use crate::util::route_gate::DASHBOARD_PATH;
use crate::util::validation::validate_login;

/// Login form. On success the credentials are stored, the session moves to
/// `User` or `Admin`, and the visitor lands on the dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        if let Err(e) = validate_login(&email.get_untracked(), &password.get_untracked()) {
            error.set(Some(e.to_string()));
            return;
        }
        error.set(None);
        pending.set(true);

        let request = LoginRequest { email: email.get_untracked().trim().to_owned(), password: password.get_untracked() };
        let client = client.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = users::login(&client, &request).await;
            pending.set(false);
            match result {
                Ok(payload) => {
                    session.update(|s| auth::complete_login(client.credentials(), s, &payload));
                    navigate(DASHBOARD_PATH, NavigateOptions::default());
                }
                Err(ApiError::Unauthorized) => error.set(Some("Invalid email or password.".to_owned())),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="page auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Log in"</h1>
                <TextField label="Email" value=email kind="email"/>
                <TextField label="Password" value=password kind="password"/>
                <ErrorLine message=error/>
                <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Log in" }}
                </button>
                <div class="auth-card__links">
                    <A href="/forgot-password">"Forgot your password?"</A>
                    <A href="/signup">"Create an account"</A>
                </div>
            </form>
        </div>
    }
}
