//! Own profile: identity edits, password change, account deletion.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::form::{ErrorLine, NoticeLine, TextField};
use crate::net::ConsoleClient;
use crate::net::types::{ChangePassword, ProfileUpdate};
use crate::net::users;
use crate::pages::api_failure;
use crate::state::auth::{self, ProfileTicket};
use crate::state::session::Session;
use crate::util::validation::{validate_change_password, validate_profile};

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <div class="page profile-page">
            <h1>"Profile"</h1>
            <AccountSummary/>
            <IdentityForm/>
            <PasswordForm/>
            <DeleteAccount/>
        </div>
    }
}

/// Account record as the user service has it.
#[component]
fn AccountSummary() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let account = LocalResource::new(move || {
        let client = client.clone();
        async move { users::logged_in_user(&client).await.map_err(|e| api_failure(&client, session, &e)) }
    });

    view! {
        <Suspense fallback=|| ()>
            {move || {
                account
                    .get()
                    .map(|result| match result {
                        Ok(user) => {
                            let full_name = [user.first_name, user.last_name]
                                .into_iter()
                                .flatten()
                                .collect::<Vec<_>>()
                                .join(" ");
                            view! {
                                <dl class="panel account-summary">
                                    <dt>"Role"</dt>
                                    <dd>{user.role.as_str()}</dd>
                                    <dt>"Status"</dt>
                                    <dd>{user.status.unwrap_or_else(|| "active".to_owned())}</dd>
                                    {(!full_name.is_empty())
                                        .then(|| view! {
                                            <dt>"Name"</dt>
                                            <dd>{full_name}</dd>
                                        })}
                                </dl>
                            }
                                .into_any()
                        }
                        Err(message) => view! { <p class="form__error">{message}</p> }.into_any(),
                    })
            }}
        </Suspense>
    }
}

#[component]
fn IdentityForm() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let username = RwSignal::new(client.credentials().read_username().unwrap_or_default());
    let email = RwSignal::new(client.credentials().read_email().unwrap_or_default());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let update = ProfileUpdate {
            username: username.get_untracked().trim().to_owned(),
            email: email.get_untracked().trim().to_owned(),
        };
        if let Err(e) = validate_profile(&update.username, &update.email) {
            error.set(Some(e.to_string()));
            return;
        }
        error.set(None);
        notice.set(None);
        pending.set(true);

        let ticket = ProfileTicket::issue(&session.get_untracked());
        let client = client.clone();
        spawn_local(async move {
            let result = users::update_profile(&client, &update).await;
            pending.set(false);
            match result {
                Ok(_) => {
                    let applied = auth::apply_profile_update(
                        client.credentials(),
                        &session.get_untracked(),
                        ticket,
                        &update.username,
                        &update.email,
                    );
                    if applied {
                        session.notify();
                        notice.set(Some("Profile updated.".to_owned()));
                    }
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    view! {
        <form class="panel" on:submit=on_submit>
            <h2>"Account"</h2>
            <TextField label="Username" value=username/>
            <TextField label="Email" value=email kind="email"/>
            <ErrorLine message=error/>
            <NoticeLine message=notice/>
            <button class="btn btn--primary" type="submit" disabled=move || pending.get()>"Save"</button>
        </form>
    }
}

#[component]
fn PasswordForm() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let current = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let checked =
            validate_change_password(&current.get_untracked(), &password.get_untracked(), &confirmation.get_untracked());
        if let Err(e) = checked {
            error.set(Some(e.to_string()));
            return;
        }
        error.set(None);
        notice.set(None);
        pending.set(true);

        let request = ChangePassword { password: current.get_untracked(), new_password: password.get_untracked() };
        let client = client.clone();
        spawn_local(async move {
            let result = users::change_password(&client, &request).await;
            pending.set(false);
            match result {
                Ok(_) => {
                    current.set(String::new());
                    password.set(String::new());
                    confirmation.set(String::new());
                    notice.set(Some("Password changed.".to_owned()));
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    view! {
        <form class="panel" on:submit=on_submit>
            <h2>"Change password"</h2>
            <TextField label="Current password" value=current kind="password"/>
            <TextField label="New password" value=password kind="password"/>
            <TextField label="Confirm new password" value=confirmation kind="password"/>
            <ErrorLine message=error/>
            <NoticeLine message=notice/>
            <button class="btn btn--primary" type="submit" disabled=move || pending.get()>"Change"</button>
        </form>
    }
}

/// Two-click deletion; a successful delete ends the session.
#[component]
fn DeleteAccount() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let confirming = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let on_click = move |_: leptos::ev::MouseEvent| {
        if !confirming.get_untracked() {
            confirming.set(true);
            return;
        }
        confirming.set(false);
        let client = client.clone();
        spawn_local(async move {
            match users::delete_profile(&client).await {
                Ok(_) => {
                    log::info!("account deleted");
                    session.update(|s| auth::logout(client.credentials(), s));
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    view! {
        <section class="panel panel--danger">
            <h2>"Delete account"</h2>
            <p>"This permanently removes your account and signs you out."</p>
            <ErrorLine message=error/>
            <button class="btn btn--danger" on:click=on_click>
                {move || if confirming.get() { "Click again to delete" } else { "Delete account" }}
            </button>
        </section>
    }
}
