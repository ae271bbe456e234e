//! # API crate: the MDD REST client
//!
//! This crate is everything between a UI action and the wire: it describes
//! requests, authenticates them, sends them, and turns responses into typed
//! results. It has no UI dependency and runs unchanged in the browser (wasm32,
//! `fetch`) and on native targets.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`request`] | Transport-neutral [`Request`] / [`Response`] descriptors |
//! | [`authenticator`] | [`RequestAuthenticator`]: bearer token injection with anonymous-URL exclusions |
//! | [`transport`] | [`Transport`] trait, reqwest [`HttpTransport`], [`AuthenticatedTransport`] middleware stage |
//! | [`client`] | [`ApiClient`]: one typed method per endpoint |
//! | [`error`] | [`ApiError`]: closed set of failure kinds |
//!
//! ## Pipeline
//!
//! ```text
//! ApiClient ──Request──▶ AuthenticatedTransport ──(+ Authorization)──▶ HttpTransport ──▶ server
//! ```

pub mod authenticator;
pub mod client;
pub mod error;
pub mod request;
pub mod transport;

pub use authenticator::{authorize, RequestAuthenticator, DEFAULT_ANONYMOUS_PATHS};
pub use client::ApiClient;
pub use error::ApiError;
pub use request::{Method, Request, Response};
pub use transport::{AuthenticatedTransport, HttpTransport, Transport};

pub use store::{AuthSuccess, LoginRequest, RegisterRequest, Subject, Subscription, User};

/// The client as wired in the application: authenticated HTTP.
pub type HttpApiClient = ApiClient<AuthenticatedTransport<HttpTransport>>;

/// Build the production client for `base_url`, authenticating with `authenticator`.
pub fn http_client(base_url: impl Into<String>, authenticator: RequestAuthenticator) -> HttpApiClient {
    ApiClient::new(
        base_url,
        AuthenticatedTransport::new(HttpTransport::new(), authenticator),
    )
}
