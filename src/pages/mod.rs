//! Routed pages.
//!
//! Public: `home`, `login`, `signup`, `reset_password`. Signed in:
//! `dashboard`, `vms`, `profile`. Admin: `users`, `clusters`,
//! `system_images`, `vm_offers`. Access is enforced by
//! [`crate::components::gate::Gate`], not by the pages themselves.

pub mod clusters;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod profile;
pub mod reset_password;
pub mod signup;
pub mod system_images;
pub mod users;
pub mod vm_offers;
pub mod vms;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::ConsoleClient;
use crate::net::error::ApiError;
use crate::pages::clusters::ClustersPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::profile::ProfilePage;
use crate::pages::reset_password::ResetPasswordPage;
use crate::pages::signup::SignupPage;
use crate::pages::system_images::SystemImagesPage;
use crate::pages::users::UsersPage;
use crate::pages::vm_offers::VmOffersPage;
use crate::pages::vms::VmsPage;
use crate::state::auth;
use crate::state::session::Session;
use crate::util::route_gate::Page;

/// View for `page`.
pub fn render_page(page: Page) -> AnyView {
    match page {
        Page::Home => view! { <HomePage/> }.into_any(),
        Page::Login => view! { <LoginPage/> }.into_any(),
        Page::Signup => view! { <SignupPage/> }.into_any(),
        Page::ForgotPassword => view! { <ResetPasswordPage/> }.into_any(),
        Page::Dashboard => view! { <DashboardPage/> }.into_any(),
        Page::Vms => view! { <VmsPage/> }.into_any(),
        Page::Profile => view! { <ProfilePage/> }.into_any(),
        Page::Users => view! { <UsersPage/> }.into_any(),
        Page::Clusters => view! { <ClustersPage/> }.into_any(),
        Page::SystemImages => view! { <SystemImagesPage/> }.into_any(),
        Page::VmOffers => view! { <VmOffersPage/> }.into_any(),
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--not-found">
            <h1>"Page not found"</h1>
            <A href="/">"Back to the home page"</A>
        </div>
    }
}

/// Turn a failed call into the message shown inline.
///
/// A rejected token also ends the session, which sends the gate back to
/// `/login`.
pub(crate) fn api_failure(client: &ConsoleClient, session: RwSignal<Session>, err: &ApiError) -> String {
    if err.is_unauthorized() && session.get_untracked().is_logged_in() {
        session.update(|s| {
            auth::handle_api_error(client.credentials(), s, err);
        });
    }
    err.to_string()
}
