//! Self-service registration.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::components::form::{ErrorLine, NoticeLine, TextField};
use crate::net::ConsoleClient;
use crate::net::types::RegisterRequest;
use crate::net::users;
use crate::util::validation::validate_signup;

#[component]
pub fn SignupPage() -> impl IntoView {
    let client = expect_context::<ConsoleClient>();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let checked = validate_signup(
            &username.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &confirmation.get_untracked(),
        );
        if let Err(e) = checked {
            error.set(Some(e.to_string()));
            return;
        }
        error.set(None);
        pending.set(true);

        let request = RegisterRequest {
            username: username.get_untracked().trim().to_owned(),
            email: email.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
            confirm_password: confirmation.get_untracked(),
        };
        let client = client.clone();
        spawn_local(async move {
            let result = users::register(&client, &request).await;
            pending.set(false);
            match result {
                Ok(_) => {
                    password.set(String::new());
                    confirmation.set(String::new());
                    notice.set(Some("Account created. You can log in now.".to_owned()));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="page auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Create an account"</h1>
                <TextField label="Username" value=username/>
                <TextField label="Email" value=email kind="email"/>
                <TextField label="Password" value=password kind="password"/>
                <TextField label="Confirm password" value=confirmation kind="password"/>
                <ErrorLine message=error/>
                <NoticeLine message=notice/>
                <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                    "Sign up"
                </button>
                <div class="auth-card__links">
                    <A href="/login">"Already have an account? Log in"</A>
                </div>
            </form>
        </div>
    }
}
