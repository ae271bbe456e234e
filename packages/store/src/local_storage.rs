//! # Browser `localStorage` store
//!
//! [`LocalStorage`] is the [`KeyValueStore`] used on the **web platform**. It
//! talks to `window.localStorage` through `web-sys`, which is where the
//! credential token lives between page loads.
//!
//! ## Error handling
//!
//! `localStorage` can be unavailable (private browsing, disabled storage, quota
//! exceeded). All trait methods swallow those errors: reads return `None` and
//! writes do nothing, so the client simply behaves as anonymous.

use web_sys::Storage;

use crate::kv::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore for the web platform.
///
/// Zero-size and `Clone`; the `Storage` handle is looked up on every call
/// because `web_sys::Storage` is tied to the current window.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        let _ = storage.set_item(key, value);
    }

    fn remove(&self, key: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        let _ = storage.remove_item(key);
    }
}
