//! Persistence, configuration and domain models for the MDD client.

pub mod config;
pub mod credentials;
pub mod kv;
pub mod models;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorage;

pub use config::ClientConfig;
pub use credentials::Credentials;
pub use kv::KeyValueStore;
pub use models::{AuthSuccess, LoginRequest, RegisterRequest, Subject, Subscription, User};
