//! Three-step password reset: request a code, verify it, set a new password.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::components::form::{ErrorLine, NoticeLine, TextField};
use crate::net::ConsoleClient;
use crate::net::types::{ResetCodeRequest, ResetPasswordRequest, VerifyCodeRequest};
use crate::net::users;
use crate::util::validation::{validate_email, validate_password_reset, validate_reset_code};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Email,
    Code,
    NewPassword,
    Done,
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let client = expect_context::<ConsoleClient>();

    let step = RwSignal::new(Step::Email);
    let email = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let current = step.get_untracked();
        let address = email.get_untracked().trim().to_owned();
        let entered_code = code.get_untracked().trim().to_owned();

        let checked = match current {
            Step::Email => validate_email(&address),
            Step::Code => validate_reset_code(&entered_code),
            Step::NewPassword => validate_password_reset(
                &address,
                &entered_code,
                &password.get_untracked(),
                &confirmation.get_untracked(),
            ),
            Step::Done => return,
        };
        if let Err(e) = checked {
            error.set(Some(e.to_string()));
            return;
        }
        error.set(None);
        pending.set(true);

        let client = client.clone();
        let new_password = password.get_untracked();
        spawn_local(async move {
            let (result, next, message) = match current {
                Step::Email => (
                    users::send_reset_code(&client, &ResetCodeRequest { email: address.clone() }).await,
                    Step::Code,
                    format!("A 6-digit code was sent to {address}."),
                ),
                Step::Code => (
                    users::verify_reset_code(&client, &VerifyCodeRequest { email: address, code: entered_code }).await,
                    Step::NewPassword,
                    "Code accepted. Choose a new password.".to_owned(),
                ),
                Step::NewPassword => (
                    users::reset_password(
                        &client,
                        &ResetPasswordRequest { email: address, code: entered_code, new_password },
                    )
                    .await,
                    Step::Done,
                    "Password updated.".to_owned(),
                ),
                Step::Done => return,
            };
            pending.set(false);
            match result {
                Ok(_) => {
                    notice.set(Some(message));
                    step.set(next);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="page auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Reset password"</h1>
                <ol class="wizard-steps">
                    <li class:wizard-steps__active=move || step.get() == Step::Email>"Email"</li>
                    <li class:wizard-steps__active=move || step.get() == Step::Code>"Code"</li>
                    <li class:wizard-steps__active=move || step.get() == Step::NewPassword>"New password"</li>
                </ol>
                {move || match step.get() {
                    Step::Email => view! { <TextField label="Email" value=email kind="email"/> }.into_any(),
                    Step::Code => {
                        view! { <TextField label="Verification code" value=code placeholder="123456"/> }.into_any()
                    }
                    Step::NewPassword => {
                        view! {
                            <TextField label="New password" value=password kind="password"/>
                            <TextField label="Confirm password" value=confirmation kind="password"/>
                        }
                            .into_any()
                    }
                    Step::Done => view! { <A href="/login">"Back to log in"</A> }.into_any(),
                }}
                <ErrorLine message=error/>
                <NoticeLine message=notice/>
                <Show when=move || step.get() != Step::Done>
                    <button class="btn btn--primary" type="submit" disabled=move || pending.get()>
                        "Continue"
                    </button>
                </Show>
            </form>
        </div>
    }
}
