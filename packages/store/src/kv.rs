//! # Key/value persistence: the client's "local storage"
//!
//! The client persists exactly one thing across restarts: the credential token.
//! Everything goes through the [`KeyValueStore`] trait so the same session logic
//! runs against browser `localStorage` ([`crate::LocalStorage`]), a directory of
//! files on native builds ([`crate::FileStore`]), or an in-memory map in tests
//! ([`crate::MemoryStore`]).
//!
//! The trait is deliberately synchronous: browser local storage is synchronous,
//! and the request pipeline reads the token on every outbound call without
//! suspending.
//!
//! Implementations never fail loudly. A read error is reported as "no value" and
//! a write error leaves the previous state in place, so a broken storage backend
//! degrades the client to "anonymous" instead of crashing it.

/// Synchronous string key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
