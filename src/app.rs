//! Root component: context providers, the shell layout and the router.

use leptos::prelude::*;
use leptos_meta::{Meta, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{footer::Footer, gate::Gate, header::Header, sidebar::Sidebar};
use crate::config::ConsoleConfig;
use crate::net::ConsoleClient;
use crate::net::client::ApiClient;
use crate::net::transport::BrowserTransport;
use crate::pages::NotFound;
use crate::state::credentials::CredentialStore;
use crate::state::session::Session;
use crate::util::route_gate::Page;
use crate::util::storage::BrowserStorage;

/// Root application component.
///
/// The session starts from whatever the credential store holds, so a
/// reload keeps the visitor signed in. Every routed page goes through
/// [`Gate`], which applies the access rules of the route table.
#[component]
pub fn App(config: ConsoleConfig) -> impl IntoView {
    provide_meta_context();

    let credentials = CredentialStore::new(BrowserStorage);
    let session = RwSignal::new(Session::hydrated(&credentials));
    let client: ConsoleClient = ApiClient::new(config.api_base_url.clone(), BrowserTransport, credentials);

    log::debug!("console talking to {}", config.api_base_url);

    provide_context(config);
    provide_context(session);
    provide_context(client);

    view! {
        <Title text="IAAS Firecracker Console"/>
        <Meta name="description" content="Manage Firecracker virtual machines"/>

        <Router>
            <Header/>
            <div class="shell">
                <Sidebar/>
                <main class="shell__main">
                    <Routes fallback=|| view! { <NotFound/> }>
                        <Route path=StaticSegment("") view=|| view! { <Gate page=Page::Home/> }/>
                        <Route path=StaticSegment("login") view=|| view! { <Gate page=Page::Login/> }/>
                        <Route path=StaticSegment("signup") view=|| view! { <Gate page=Page::Signup/> }/>
                        <Route
                            path=StaticSegment("forgot-password")
                            view=|| view! { <Gate page=Page::ForgotPassword/> }
                        />
                        <Route path=StaticSegment("dashboard") view=|| view! { <Gate page=Page::Dashboard/> }/>
                        <Route path=StaticSegment("vms") view=|| view! { <Gate page=Page::Vms/> }/>
                        <Route path=StaticSegment("profile") view=|| view! { <Gate page=Page::Profile/> }/>
                        <Route path=StaticSegment("users") view=|| view! { <Gate page=Page::Users/> }/>
                        <Route path=StaticSegment("clusters") view=|| view! { <Gate page=Page::Clusters/> }/>
                        <Route
                            path=StaticSegment("system-images")
                            view=|| view! { <Gate page=Page::SystemImages/> }
                        />
                        <Route
                            path=StaticSegment("vm-offers-management")
                            view=|| view! { <Gate page=Page::VmOffers/> }
                        />
                    </Routes>
                </main>
            </div>
            <Footer/>
        </Router>
    }
}
