//! Current-user identity.
//!
//! There is no real identity provider yet: every login resolves to the
//! guest user. The persisted `auth:user` value is honoured when present so
//! that an externally written identity survives restarts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

pub const AUTH_USER_KEY: &str = "auth:user";
pub const GUEST_ID: &str = "guest-000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: BTreeSet<String>,
    #[serde(default)]
    pub permisos: BTreeSet<String>,
}

impl User {
    pub fn guest() -> Self {
        Self {
            id: GUEST_ID.to_string(),
            nombre: "Invitado".to_string(),
            email: "invitado@example.com".to_string(),
            roles: BTreeSet::from(["guest".to_string()]),
            permisos: BTreeSet::new(),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.id == GUEST_ID
    }
}

/// Holds the single current user and mirrors it to storage.
pub struct IdentityProvider<'a, K: KeyValueStore + ?Sized> {
    kv: &'a K,
    current: User,
}

impl<'a, K: KeyValueStore + ?Sized> IdentityProvider<'a, K> {
    /// Read `auth:user`; absence, a read fault or an unparseable value
    /// yields the guest. The resolved user is written back.
    pub fn load(kv: &'a K) -> Self {
        let current = match kv.get(AUTH_USER_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<User>(&raw).unwrap_or_else(|e| {
                tracing::warn!("ignoring malformed stored identity: {e}");
                User::guest()
            }),
            Ok(None) => User::guest(),
            Err(e) => {
                tracing::warn!("could not read stored identity: {e}");
                User::guest()
            }
        };
        let provider = Self { kv, current };
        provider.persist();
        provider
    }

    pub fn current(&self) -> &User {
        &self.current
    }

    pub fn user_id(&self) -> &str {
        &self.current.id
    }

    pub fn is_guest(&self) -> bool {
        self.current.is_guest()
    }

    /// A user is always set once loaded, guest included.
    pub fn is_authenticated(&self) -> bool {
        !self.current.id.is_empty()
    }

    /// Resolve a credential to a user. Always the guest for now; the
    /// credential is accepted and ignored.
    pub fn login(&mut self, _credential: Option<&str>) -> User {
        self.set_current(User::guest());
        self.current.clone()
    }

    pub fn logout(&mut self) {
        self.set_current(User::guest());
    }

    fn set_current(&mut self, user: User) {
        tracing::debug!(from = %self.current.id, to = %user.id, "identity changed");
        self.current = user;
        self.persist();
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.current) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("could not serialize identity: {e}");
                return;
            }
        };
        if let Err(e) = self.kv.set(AUTH_USER_KEY, &json) {
            tracing::warn!("identity not saved: {e}");
        }
    }
}
