//! Route view wrapper that enforces the route table's access rules.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::pages::{NotFound, render_page};
use crate::state::session::Session;
use crate::util::route_gate::{Page, ROUTES, Resolution, entry_for, resolve};

/// Renders `page` only while the session may see it; otherwise redirects.
///
/// The decision is a memo over the session signal, so logging out on a
/// gated page sends the visitor to `/login` at once.
#[component]
pub fn Gate(page: Page) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let path = entry_for(ROUTES, page).map_or("", |entry| entry.path);
    let resolution = Memo::new(move |_| resolve(ROUTES, path, &session.get()));

    move || match resolution.get() {
        Resolution::Render(page) => render_page(page),
        Resolution::Redirect(to) => view! { <Redirect path=to/> }.into_any(),
        Resolution::NotFound => view! { <NotFound/> }.into_any(),
    }
}
