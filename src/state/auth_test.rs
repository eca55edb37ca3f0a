use super::*;
use crate::net::types::{Role, User};
use crate::state::session::SessionPhase;
use crate::util::storage::MemoryStorage;

fn payload(role: Role) -> LoginPayload {
    LoginPayload {
        access: "jwt-1".into(),
        refresh: None,
        user: User {
            id: 12,
            username: "lin".into(),
            email: "lin@example.com".into(),
            role,
            status: None,
            first_name: None,
            last_name: None,
        },
    }
}

fn fresh() -> (CredentialStore<MemoryStorage>, Session) {
    (CredentialStore::new(MemoryStorage::new()), Session::new())
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_as_user_writes_record_and_enters_user_phase() {
    let (creds, mut session) = fresh();
    complete_login(&creds, &mut session, &payload(Role::User));

    assert_eq!(session.phase(), SessionPhase::User);
    let record = creds.read_record().unwrap();
    assert_eq!(record.token, "jwt-1");
    assert_eq!(record.user_id, 12);
    assert!(!record.is_admin);
}

#[test]
fn login_as_admin_promotes() {
    let (creds, mut session) = fresh();
    complete_login(&creds, &mut session, &payload(Role::Admin));
    assert_eq!(session.phase(), SessionPhase::Admin);
    assert!(creds.read_is_admin());
}

#[test]
fn login_then_reload_hydrates_same_phase() {
    let (creds, mut session) = fresh();
    complete_login(&creds, &mut session, &payload(Role::Admin));
    let reloaded = Session::hydrated(&creds);
    assert_eq!(reloaded.phase(), session.phase());
}

#[test]
fn unknown_role_is_not_admin() {
    let (creds, mut session) = fresh();
    complete_login(&creds, &mut session, &payload(Role::Other));
    assert_eq!(session.phase(), SessionPhase::User);
}

// =============================================================
// Logout and 401 handling
// =============================================================

#[test]
fn logout_clears_everything() {
    let (creds, mut session) = fresh();
    complete_login(&creds, &mut session, &payload(Role::Admin));
    logout(&creds, &mut session);

    assert_eq!(session.phase(), SessionPhase::Anonymous);
    assert_eq!(creds.read_record(), None);
    assert_eq!(Session::hydrated(&creds).phase(), SessionPhase::Anonymous);
}

#[test]
fn unauthorized_logs_out_signed_in_session() {
    let (creds, mut session) = fresh();
    complete_login(&creds, &mut session, &payload(Role::User));
    assert!(handle_api_error(&creds, &mut session, &ApiError::Unauthorized));
    assert!(!session.is_logged_in());
    assert_eq!(creds.read_token(), None);
}

#[test]
fn other_errors_keep_session() {
    let (creds, mut session) = fresh();
    complete_login(&creds, &mut session, &payload(Role::User));
    let err = ApiError::UnexpectedStatus { status: 500, message: None };
    assert!(!handle_api_error(&creds, &mut session, &err));
    assert!(session.is_logged_in());
}

#[test]
fn unauthorized_while_anonymous_is_ignored() {
    let (creds, mut session) = fresh();
    let before = session;
    assert!(!handle_api_error(&creds, &mut session, &ApiError::Unauthorized));
    assert_eq!(session, before);
}

// =============================================================
// Profile write-back
// =============================================================

#[test]
fn profile_update_applies_in_same_session() {
    let (creds, mut session) = fresh();
    complete_login(&creds, &mut session, &payload(Role::User));
    let ticket = ProfileTicket::issue(&session);

    assert!(apply_profile_update(&creds, &session, ticket, "lin2", "lin2@example.com"));
    assert_eq!(creds.read_username().as_deref(), Some("lin2"));
    assert_eq!(creds.read_email().as_deref(), Some("lin2@example.com"));
}

#[test]
fn profile_update_after_logout_is_discarded() {
    let (creds, mut session) = fresh();
    complete_login(&creds, &mut session, &payload(Role::User));
    let ticket = ProfileTicket::issue(&session);

    logout(&creds, &mut session);
    assert!(!apply_profile_update(&creds, &session, ticket, "lin2", "lin2@example.com"));
    assert_eq!(creds.read_username(), None);
    assert_eq!(creds.read_email(), None);
}

#[test]
fn profile_update_after_relogin_is_discarded() {
    let (creds, mut session) = fresh();
    complete_login(&creds, &mut session, &payload(Role::User));
    let ticket = ProfileTicket::issue(&session);

    logout(&creds, &mut session);
    complete_login(&creds, &mut session, &payload(Role::User));
    assert!(!apply_profile_update(&creds, &session, ticket, "stale", "stale@example.com"));
    assert_eq!(creds.read_username().as_deref(), Some("lin"));
}

#[test]
fn profile_update_without_token_is_discarded() {
    let (creds, mut session) = fresh();
    session.login();
    let ticket = ProfileTicket::issue(&session);
    assert!(!apply_profile_update(&creds, &session, ticket, "x", "x@example.com"));
    assert_eq!(creds.read_username(), None);
}
