//! Login, logout and profile write-back flows.
//!
//! Each flow touches the credential store and the session together so the
//! two never disagree for longer than one synchronous call.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::error::ApiError;
use crate::net::types::LoginPayload;
use crate::state::credentials::{CredentialRecord, CredentialStore};
use crate::state::session::Session;
use crate::util::storage::KeyValueStore;

/// Persist a successful login and update the session.
pub fn complete_login<S: KeyValueStore>(credentials: &CredentialStore<S>, session: &mut Session, payload: &LoginPayload) {
    let is_admin = payload.user.role.is_admin();
    credentials.write(&CredentialRecord {
        token: payload.access.clone(),
        user_id: payload.user.id,
        email: payload.user.email.clone(),
        username: payload.user.username.clone(),
        is_admin,
    });
    session.login();
    if is_admin {
        session.set_admin();
    }
    log::info!("logged in as {} (admin: {is_admin})", payload.user.username);
}

/// Forget the stored credentials and reset the session.
pub fn logout<S: KeyValueStore>(credentials: &CredentialStore<S>, session: &mut Session) {
    credentials.clear();
    session.logout();
    log::info!("logged out");
}

/// Log out when `err` means the token was rejected.
///
/// Returns whether a logout happened. Anonymous sessions are left alone.
pub fn handle_api_error<S: KeyValueStore>(credentials: &CredentialStore<S>, session: &mut Session, err: &ApiError) -> bool {
    if !err.is_unauthorized() || !session.is_logged_in() {
        return false;
    }
    log::warn!("token rejected, ending session");
    logout(credentials, session);
    true
}

/// Session generation captured when a profile update was sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfileTicket {
    generation: u64,
}

impl ProfileTicket {
    pub fn issue(session: &Session) -> Self {
        Self { generation: session.generation() }
    }
}

/// Write an accepted profile update back into the credential store.
///
/// Skipped when the session has logged out since `ticket` was issued, or
/// when no token is stored. Returns whether the write happened.
pub fn apply_profile_update<S: KeyValueStore>(
    credentials: &CredentialStore<S>,
    session: &Session,
    ticket: ProfileTicket,
    username: &str,
    email: &str,
) -> bool {
    let current = session.is_logged_in() && session.generation() == ticket.generation;
    if !current || credentials.read_token().is_none() {
        log::warn!("discarding profile update from an ended session");
        return false;
    }
    credentials.update_profile(username, email);
    true
}
