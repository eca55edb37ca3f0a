//! Route authorization gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router registers every path, but each route view asks [`resolve`]
//! before rendering, and the sidebar builds its links from
//! [`visible_routes`]. Both are recomputed from the current [`Session`] on
//! every change; nothing here is cached.

#[cfg(test)]
#[path = "route_gate_test.rs"]
mod route_gate_test;

use crate::state::session::Session;

/// Who may reach a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

impl Access {
    /// Whether `session` satisfies this requirement.
    pub fn permits(self, session: &Session) -> bool {
        match self {
            Self::Public => true,
            Self::Authenticated => session.is_logged_in(),
            Self::Admin => session.is_logged_in() && session.is_admin(),
        }
    }
}

/// Every view the router can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    Signup,
    ForgotPassword,
    Dashboard,
    Vms,
    Profile,
    Users,
    Clusters,
    SystemImages,
    VmOffers,
}

/// A single entry of the route table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub page: Page,
    pub access: Access,
    /// Sidebar label; `None` keeps the route out of navigation.
    pub label: Option<&'static str>,
}

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// The console's route table.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry { path: "/", page: Page::Home, access: Access::Public, label: None },
    RouteEntry { path: LOGIN_PATH, page: Page::Login, access: Access::Public, label: None },
    RouteEntry { path: "/signup", page: Page::Signup, access: Access::Public, label: None },
    RouteEntry { path: "/forgot-password", page: Page::ForgotPassword, access: Access::Public, label: None },
    RouteEntry { path: DASHBOARD_PATH, page: Page::Dashboard, access: Access::Authenticated, label: Some("Dashboard") },
    RouteEntry { path: "/vms", page: Page::Vms, access: Access::Authenticated, label: Some("Virtual Machines") },
    RouteEntry { path: "/profile", page: Page::Profile, access: Access::Authenticated, label: Some("Profile") },
    RouteEntry { path: "/users", page: Page::Users, access: Access::Admin, label: Some("Users") },
    RouteEntry { path: "/clusters", page: Page::Clusters, access: Access::Admin, label: Some("Clusters") },
    RouteEntry { path: "/system-images", page: Page::SystemImages, access: Access::Admin, label: Some("System Images") },
    RouteEntry {
        path: "/vm-offers-management",
        page: Page::VmOffers,
        access: Access::Admin,
        label: Some("VM Offers"),
    },
];

/// Outcome of asking the gate about a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Render(Page),
    Redirect(&'static str),
    NotFound,
}

/// Routes from `table` that `session` may reach, in table order.
pub fn visible_routes<'a>(table: &'a [RouteEntry], session: &Session) -> Vec<&'a RouteEntry> {
    table.iter().filter(|entry| entry.access.permits(session)).collect()
}

/// Decide what to show for `path`.
///
/// Known but gated paths redirect: anonymous visitors to `/login`, signed-in
/// users without admin rights to `/dashboard`. Trailing slashes are ignored,
/// and a path of only slashes is the home page.
pub fn resolve(table: &[RouteEntry], path: &str, session: &Session) -> Resolution {
    let normalized = normalize(path);
    let Some(entry) = table.iter().find(|entry| entry.path == normalized) else {
        return Resolution::NotFound;
    };
    if entry.access.permits(session) {
        return Resolution::Render(entry.page);
    }
    if session.is_logged_in() {
        Resolution::Redirect(DASHBOARD_PATH)
    } else {
        Resolution::Redirect(LOGIN_PATH)
    }
}

/// Table entry for `page`.
pub fn entry_for(table: &[RouteEntry], page: Page) -> Option<&RouteEntry> {
    table.iter().find(|entry| entry.page == page)
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
