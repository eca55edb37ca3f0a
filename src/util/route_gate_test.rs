use super::*;

const ONE_OF_EACH: &[RouteEntry] = &[
    RouteEntry { path: "/", page: Page::Home, access: Access::Public, label: None },
    RouteEntry { path: "/vms", page: Page::Vms, access: Access::Authenticated, label: Some("VMs") },
    RouteEntry { path: "/users", page: Page::Users, access: Access::Admin, label: Some("Users") },
];

fn anonymous() -> Session {
    Session::new()
}

fn user() -> Session {
    let mut s = Session::new();
    s.login();
    s
}

fn admin() -> Session {
    let mut s = user();
    s.set_admin();
    s
}

fn visible_pages(table: &[RouteEntry], session: &Session) -> Vec<Page> {
    visible_routes(table, session).into_iter().map(|e| e.page).collect()
}

// =============================================================
// visible_routes
// =============================================================

#[test]
fn anonymous_sees_only_public() {
    assert_eq!(visible_pages(ONE_OF_EACH, &anonymous()), vec![Page::Home]);
}

#[test]
fn user_sees_public_and_authenticated() {
    assert_eq!(visible_pages(ONE_OF_EACH, &user()), vec![Page::Home, Page::Vms]);
}

#[test]
fn admin_sees_everything() {
    assert_eq!(visible_pages(ONE_OF_EACH, &admin()), vec![Page::Home, Page::Vms, Page::Users]);
}

#[test]
fn visible_set_follows_logout() {
    let mut session = admin();
    assert_eq!(visible_routes(ONE_OF_EACH, &session).len(), 3);
    session.logout();
    assert_eq!(visible_pages(ONE_OF_EACH, &session), vec![Page::Home]);
}

#[test]
fn console_table_hides_gated_routes_when_anonymous() {
    let visible = visible_routes(ROUTES, &anonymous());
    assert!(visible.iter().all(|e| e.access == Access::Public));
    assert_eq!(visible.len(), 4);
}

#[test]
fn console_table_admin_routes_require_admin() {
    let admin_pages: Vec<Page> = ROUTES.iter().filter(|e| e.access == Access::Admin).map(|e| e.page).collect();
    assert_eq!(admin_pages, vec![Page::Users, Page::Clusters, Page::SystemImages, Page::VmOffers]);
    let user_visible = visible_pages(ROUTES, &user());
    assert!(admin_pages.iter().all(|p| !user_visible.contains(p)));
}

#[test]
fn console_table_paths_are_unique() {
    for (i, a) in ROUTES.iter().enumerate() {
        for b in &ROUTES[i + 1..] {
            assert_ne!(a.path, b.path);
            assert_ne!(a.page, b.page);
        }
    }
}

// =============================================================
// Access
// =============================================================

#[test]
fn admin_access_needs_login_even_if_flag_were_set() {
    // set_admin before login is refused, so the flag can never be observed alone.
    let mut session = Session::new();
    session.set_admin();
    assert!(!Access::Admin.permits(&session));
    assert!(!Access::Authenticated.permits(&session));
    assert!(Access::Public.permits(&session));
}

// =============================================================
// resolve
// =============================================================

#[test]
fn resolve_renders_visible_route() {
    assert_eq!(resolve(ROUTES, "/dashboard", &user()), Resolution::Render(Page::Dashboard));
    assert_eq!(resolve(ROUTES, "/users", &admin()), Resolution::Render(Page::Users));
}

#[test]
fn resolve_redirects_anonymous_to_login() {
    assert_eq!(resolve(ROUTES, "/vms", &anonymous()), Resolution::Redirect(LOGIN_PATH));
    assert_eq!(resolve(ROUTES, "/clusters", &anonymous()), Resolution::Redirect(LOGIN_PATH));
}

#[test]
fn resolve_redirects_non_admin_to_dashboard() {
    assert_eq!(resolve(ROUTES, "/system-images", &user()), Resolution::Redirect(DASHBOARD_PATH));
}

#[test]
fn resolve_unknown_path_is_not_found() {
    assert_eq!(resolve(ROUTES, "/nope", &admin()), Resolution::NotFound);
}

#[test]
fn resolve_ignores_trailing_slash_and_query() {
    assert_eq!(resolve(ROUTES, "/vms/", &user()), Resolution::Render(Page::Vms));
    assert_eq!(resolve(ROUTES, "/vms?tab=2", &user()), Resolution::Render(Page::Vms));
    assert_eq!(resolve(ROUTES, "/", &anonymous()), Resolution::Render(Page::Home));
}

#[test]
fn resolve_slash_only_paths_to_home() {
    assert_eq!(resolve(ROUTES, "//", &anonymous()), Resolution::Render(Page::Home));
    assert_eq!(resolve(ROUTES, "///?next=1", &user()), Resolution::Render(Page::Home));
    assert_eq!(resolve(ROUTES, "/dashboard//", &anonymous()), Resolution::Redirect(LOGIN_PATH));
}

#[test]
fn entry_for_finds_page_path() {
    assert_eq!(entry_for(ROUTES, Page::VmOffers).map(|e| e.path), Some("/vm-offers-management"));
}
