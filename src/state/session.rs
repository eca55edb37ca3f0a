//! Auth-session flags for the current page lifetime.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read synchronously by the route gate and the shell chrome. Provided as a
//! `RwSignal<Session>` context by the root component; no global instance.
//!
//! STATE MACHINE
//! =============
//! `Anonymous --login--> User --set_admin--> Admin`, and `logout` returns
//! `User`/`Admin` to `Anonymous` in a single assignment. `Admin` is only
//! reachable through `User`, so `is_admin` implies `is_logged_in`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::state::credentials::CredentialStore;
use crate::util::storage::KeyValueStore;

/// The three reachable combinations of the session flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Anonymous,
    User,
    Admin,
}

/// Authentication flags plus a logout generation counter.
///
/// The generation increases on every logout. Async work that captured an
/// older generation must not write back into the credential store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    logged_in: bool,
    admin: bool,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.logged_in, self.admin) {
            (true, true) => SessionPhase::Admin,
            (true, false) => SessionPhase::User,
            (false, _) => SessionPhase::Anonymous,
        }
    }

    /// Mark the session as logged in. Admin status is untouched.
    pub fn login(&mut self) {
        self.logged_in = true;
    }

    /// Promote to admin. Ignored unless already logged in.
    ///
    /// Returns whether the promotion was applied.
    pub fn set_admin(&mut self) -> bool {
        if !self.logged_in {
            log::warn!("set_admin ignored: no user is logged in");
            return false;
        }
        self.admin = true;
        true
    }

    /// Drop back to anonymous and start a new generation.
    pub fn logout(&mut self) {
        *self = Self { logged_in: false, admin: false, generation: self.generation + 1 };
    }

    /// Restore flags from persisted credentials.
    ///
    /// A present token logs in; the stored admin flag then promotes. With no
    /// token the session is left as it is. Reads storage only, so it finishes
    /// before the first route is evaluated.
    pub fn hydrate<S: KeyValueStore>(&mut self, credentials: &CredentialStore<S>) {
        if credentials.read_token().is_none() {
            return;
        }
        self.login();
        if credentials.read_is_admin() {
            self.set_admin();
        }
    }

    /// Convenience constructor: a fresh session hydrated from `credentials`.
    pub fn hydrated<S: KeyValueStore>(credentials: &CredentialStore<S>) -> Self {
        let mut session = Self::new();
        session.hydrate(credentials);
        session
    }
}
