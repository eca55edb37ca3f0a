//! Durable credential record for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written on login, partially rewritten by profile edits, cleared on logout.
//! Read once at start-up to hydrate the session and on every API call to
//! attach the bearer token.
//!
//! Each field lives under its own key. The key names match the ones the
//! previous console wrote, so sessions survive the upgrade.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use crate::util::storage::KeyValueStore;

pub const TOKEN_KEY: &str = "iaas-token";
pub const USER_ID_KEY: &str = "iaas-userId";
pub const EMAIL_KEY: &str = "iaas-email";
pub const USERNAME_KEY: &str = "iaas-username";
pub const ADMIN_KEY: &str = "iaas-admin";

const ALL_KEYS: [&str; 5] = [TOKEN_KEY, USER_ID_KEY, EMAIL_KEY, USERNAME_KEY, ADMIN_KEY];

/// Everything persisted about the authenticated user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialRecord {
    pub token: String,
    pub user_id: i64,
    pub email: String,
    pub username: String,
    pub is_admin: bool,
}

/// Typed access to the credential keys of a [`KeyValueStore`].
#[derive(Clone, Debug, Default)]
pub struct CredentialStore<S> {
    store: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist every field of `record`. Not atomic across keys.
    pub fn write(&self, record: &CredentialRecord) {
        self.store.set(TOKEN_KEY, &record.token);
        self.store.set(USER_ID_KEY, &record.user_id.to_string());
        self.store.set(EMAIL_KEY, &record.email);
        self.store.set(USERNAME_KEY, &record.username);
        self.store.set(ADMIN_KEY, flag_to_str(record.is_admin));
    }

    /// Bearer token, or `None` when absent or empty.
    pub fn read_token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn read_user_id(&self) -> Option<i64> {
        self.store.get(USER_ID_KEY)?.trim().parse().ok()
    }

    pub fn read_email(&self) -> Option<String> {
        self.store.get(EMAIL_KEY)
    }

    pub fn read_username(&self) -> Option<String> {
        self.store.get(USERNAME_KEY)
    }

    pub fn read_is_admin(&self) -> bool {
        self.store.get(ADMIN_KEY).is_some_and(|raw| flag_from_str(&raw))
    }

    /// The full record, if a token and user id are both present.
    pub fn read_record(&self) -> Option<CredentialRecord> {
        Some(CredentialRecord {
            token: self.read_token()?,
            user_id: self.read_user_id()?,
            email: self.read_email().unwrap_or_default(),
            username: self.read_username().unwrap_or_default(),
            is_admin: self.read_is_admin(),
        })
    }

    /// Overwrite the profile fields only.
    pub fn update_profile(&self, username: &str, email: &str) {
        self.store.set(USERNAME_KEY, username);
        self.store.set(EMAIL_KEY, email);
    }

    /// Remove every credential key. Safe to call repeatedly.
    pub fn clear(&self) {
        for key in ALL_KEYS {
            self.store.remove(key);
        }
    }
}

/// Storage form of the admin flag.
pub fn flag_to_str(flag: bool) -> &'static str {
    if flag { "true" } else { "false" }
}

/// Strict read of the admin flag: only the exact string `"true"` is true.
pub fn flag_from_str(raw: &str) -> bool {
    raw == "true"
}
