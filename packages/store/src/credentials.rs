//! The persisted credential slot.
//!
//! [`Credentials`] binds a [`KeyValueStore`] to the well-known token key. It is
//! the only handle through which the token is read or written: the session
//! store writes and clears it, the request authenticator only reads it.
//! Clones share the underlying store.

use std::fmt;
use std::rc::Rc;

use crate::kv::KeyValueStore;

/// Default storage key for the bearer token.
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Single-slot handle to the persisted bearer token.
#[derive(Clone)]
pub struct Credentials {
    store: Rc<dyn KeyValueStore>,
    key: String,
}

impl Credentials {
    pub fn new(store: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            store: Rc::new(store),
            key: key.into(),
        }
    }

    /// Bind `store` to the default `"token"` key.
    pub fn with_default_key(store: impl KeyValueStore + 'static) -> Self {
        Self::new(store, DEFAULT_TOKEN_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current token, if one is stored. Empty strings count as absent.
    pub fn token(&self) -> Option<String> {
        self.store.get(&self.key).filter(|t| !t.is_empty())
    }

    pub fn is_present(&self) -> bool {
        self.token().is_some()
    }

    /// Store `token`, overwriting any previous one.
    pub fn save(&self, token: &str) {
        self.store.set(&self.key, token);
    }

    pub fn clear(&self) {
        self.store.remove(&self.key);
    }
}

impl fmt::Debug for Credentials {
    // Never print the token itself.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("present", &self.is_present())
            .finish()
    }
}
