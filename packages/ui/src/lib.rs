//! Shared client state and UI for the MDD front end.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`observable`] | [`Observable`] value with replaying change streams |
//! | [`session`] | [`SessionStore`]: who is logged in |
//! | [`guard`] | [`AuthGuard`] / [`UnauthGuard`] route access policy |
//! | [`subscriptions`] | [`OptimisticSubscriptionController`] for subject lists |
//! | [`auth`] | [`AuthService`] credential flows, [`SessionProvider`] context |
//! | [`services`] | [`AppServices`] composition root |
//!
//! The first four are plain Rust and are tested without a renderer; the rest
//! binds them to Dioxus.

pub mod auth;
pub mod guard;
pub mod observable;
pub mod services;
pub mod session;
pub mod subscriptions;

mod header;
mod hooks;
mod protected;
pub mod views;

pub use auth::{describe_error, AuthService, LogoutButton, SessionProvider};
pub use guard::{AuthGuard, GuardDecision, Navigator, RouteGuard, UnauthGuard};
pub use header::Header;
pub use hooks::{use_services, use_session, use_watch};
pub use observable::{Observable, Watch};
pub use protected::{RequireAnonymous, RequireAuth, RouterNavigator};
pub use services::{make_token_store, AppServices, HttpAuthService};
pub use session::{Session, SessionStore};
pub use subscriptions::{
    annotate, MutationOrdering, MutationOutcome, OptimisticSubscriptionController, SubjectView,
    SubscriptionService,
};
