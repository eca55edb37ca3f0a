//! Account administration.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::form::{ErrorLine, NoticeLine, TextField};
use crate::net::ConsoleClient;
use crate::net::types::{RegisterRequest, Role, User, UserUpdate};
use crate::net::users;
use crate::pages::api_failure;
use crate::state::session::Session;
use crate::util::validation::validate_signup;

const ACTIVE: &str = "active";
const INACTIVE: &str = "inactive";

type Accounts = LocalResource<Result<Vec<User>, String>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RoleFilter {
    All,
    Admins,
    Users,
}

impl RoleFilter {
    fn keeps(self, user: &User) -> bool {
        match self {
            Self::All => true,
            Self::Admins => user.role.is_admin(),
            Self::Users => !user.role.is_admin(),
        }
    }
}

fn matches_query(user: &User, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || user.username.to_lowercase().contains(&query) || user.email.to_lowercase().contains(&query)
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let query = RwSignal::new(String::new());
    let filter = RwSignal::new(RoleFilter::All);

    let accounts: Accounts = LocalResource::new(move || {
        let client = client.clone();
        async move { users::list_users(&client).await.map_err(|e| api_failure(&client, session, &e)) }
    });

    let filter_button = move |label: &'static str, value: RoleFilter| {
        view! {
            <button
                class="chip"
                class:chip--selected=move || filter.get() == value
                on:click=move |_| filter.set(value)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="page users-page">
            <header class="page__header">
                <h1>"Users"</h1>
                <button class="btn" on:click=move |_| accounts.refetch()>"Refresh"</button>
            </header>
            <ErrorLine message=error/>
            <NoticeLine message=notice/>
            <div class="toolbar">
                <TextField label="Search" value=query placeholder="username or email"/>
                {filter_button("All", RoleFilter::All)}
                {filter_button("Admins", RoleFilter::Admins)}
                {filter_button("Users", RoleFilter::Users)}
            </div>
            <Suspense fallback=|| view! { <p class="page__loading">"Loading users..."</p> }>
                {move || {
                    accounts
                        .get()
                        .map(|result| match result {
                            Ok(list) => {
                                let needle = query.get();
                                let role = filter.get();
                                view! {
                                    <table class="data-table">
                                        <thead>
                                            <tr>
                                                <th>"Username"</th>
                                                <th>"Email"</th>
                                                <th>"Role"</th>
                                                <th>"Status"</th>
                                                <th></th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {list
                                                .into_iter()
                                                .filter(|user| role.keeps(user) && matches_query(user, &needle))
                                                .map(|user| {
                                                    view! {
                                                        <UserRow user=user accounts=accounts error=error notice=notice/>
                                                    }
                                                })
                                                .collect_view()}
                                        </tbody>
                                    </table>
                                }
                                    .into_any()
                            }
                            Err(message) => view! { <p class="form__error">{message}</p> }.into_any(),
                        })
                }}
            </Suspense>
            <CreateAdminForm accounts=accounts/>
        </div>
    }
}

#[component]
fn UserRow(
    user: User,
    accounts: Accounts,
    error: RwSignal<Option<String>>,
    notice: RwSignal<Option<String>>,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let confirming = RwSignal::new(false);
    let id = user.id;
    let name = user.username.clone();
    let role = user.role;
    let status = user.status.clone().unwrap_or_else(|| ACTIVE.to_owned());
    let active = status == ACTIVE;

    let apply = {
        let client = client.clone();
        let name = name.clone();
        move |update: UserUpdate| {
            let client = client.clone();
            let name = name.clone();
            spawn_local(async move {
                match users::update_user(&client, id, &update).await {
                    Ok(_) => {
                        notice.set(Some(format!("{name} updated.")));
                        accounts.refetch();
                    }
                    Err(e) => error.set(Some(api_failure(&client, session, &e))),
                }
            });
        }
    };

    let toggle_role = {
        let apply = apply.clone();
        move |_: leptos::ev::MouseEvent| {
            let next = if role.is_admin() { Role::User } else { Role::Admin };
            apply(UserUpdate { role: Some(next), ..UserUpdate::default() });
        }
    };
    let toggle_status = move |_: leptos::ev::MouseEvent| {
        let next = if active { INACTIVE } else { ACTIVE };
        apply(UserUpdate { status: Some(next.to_owned()), ..UserUpdate::default() });
    };

    let delete = move |_: leptos::ev::MouseEvent| {
        if !confirming.get_untracked() {
            confirming.set(true);
            return;
        }
        confirming.set(false);
        let client = client.clone();
        let name = name.clone();
        spawn_local(async move {
            match users::delete_user(&client, id).await {
                Ok(_) => {
                    log::info!("deleted user {id}");
                    notice.set(Some(format!("{name} deleted.")));
                    accounts.refetch();
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    view! {
        <tr>
            <td>{user.username}</td>
            <td>{user.email}</td>
            <td><span class="badge">{role.as_str()}</span></td>
            <td>
                <span class={if active { "status-pill status-pill--running" } else { "status-pill" }}>{status}</span>
            </td>
            <td class="data-table__actions">
                <button class="btn btn--small" on:click=toggle_role>
                    {if role.is_admin() { "Make user" } else { "Make admin" }}
                </button>
                <button class="btn btn--small" on:click=toggle_status>
                    {if active { "Deactivate" } else { "Activate" }}
                </button>
                <button class="btn btn--small btn--danger" on:click=delete>
                    {move || if confirming.get() { "Confirm delete" } else { "Delete" }}
                </button>
            </td>
        </tr>
    }
}

#[component]
fn CreateAdminForm(accounts: Accounts) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let client = expect_context::<ConsoleClient>();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = RegisterRequest {
            username: username.get_untracked().trim().to_owned(),
            email: email.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
            confirm_password: confirmation.get_untracked(),
        };
        let checked = validate_signup(&request.username, &request.email, &request.password, &request.confirm_password);
        if let Err(e) = checked {
            error.set(Some(e.to_string()));
            return;
        }
        error.set(None);

        let client = client.clone();
        spawn_local(async move {
            match users::create_admin(&client, &request).await {
                Ok(_) => {
                    notice.set(Some(format!("Administrator {} created.", request.username)));
                    username.set(String::new());
                    email.set(String::new());
                    password.set(String::new());
                    confirmation.set(String::new());
                    accounts.refetch();
                }
                Err(e) => error.set(Some(api_failure(&client, session, &e))),
            }
        });
    };

    view! {
        <form class="panel" on:submit=on_submit>
            <h2>"New administrator"</h2>
            <TextField label="Username" value=username/>
            <TextField label="Email" value=email kind="email"/>
            <TextField label="Password" value=password kind="password"/>
            <TextField label="Confirm password" value=confirmation kind="password"/>
            <ErrorLine message=error/>
            <NoticeLine message=notice/>
            <button class="btn btn--primary" type="submit">"Create"</button>
        </form>
    }
}
