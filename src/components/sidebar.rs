//! Navigation sidebar built from the routes the session may reach.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::session::Session;
use crate::util::route_gate::{Access, ROUTES, RouteEntry, visible_routes};

/// Sidebar links, split into the user section and the admin section.
///
/// Hidden entirely while anonymous. The admin heading only appears when at
/// least one admin route is visible.
#[component]
pub fn Sidebar() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();

    let section = move |admin: bool| {
        visible_routes(ROUTES, &session.get())
            .into_iter()
            .filter(|entry| entry.label.is_some() && (entry.access == Access::Admin) == admin)
            .copied()
            .collect::<Vec<RouteEntry>>()
    };

    view! {
        <Show when=move || session.get().is_logged_in()>
            <aside class="sidebar">
                <nav class="sidebar__section">
                    {move || section(false).into_iter().map(|entry| view! { <SidebarLink entry/> }).collect_view()}
                </nav>
                <Show when=move || !section(true).is_empty()>
                    <h3 class="sidebar__heading">"Administration"</h3>
                    <nav class="sidebar__section">
                        {move || section(true).into_iter().map(|entry| view! { <SidebarLink entry/> }).collect_view()}
                    </nav>
                </Show>
            </aside>
        </Show>
    }
}

#[component]
fn SidebarLink(entry: RouteEntry) -> impl IntoView {
    view! {
        <A href=entry.path attr:class="sidebar__link">
            {entry.label.unwrap_or(entry.path)}
        </A>
    }
}
