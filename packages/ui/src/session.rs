//! # Session state: who is logged in
//!
//! [`SessionStore`] is the single source of truth for authentication status. It
//! is constructed once at the composition root with [`SessionStore::initialize`]
//! and handed (cloned, reference-counted) to every component that needs it: the
//! route guards, the auth flows, the header.
//!
//! ## State machine
//!
//! ```text
//!               login(user)                      logout()
//!  Anonymous ───────────────▶ Authenticated ───────────────▶ Anonymous
//!      ▲                     { user: Some(u) }                (token cleared)
//!      │                            ▲
//!  initialize()                     │ login(user)   (profile resolved / refreshed)
//!   no token                        │
//!                     Authenticated { user: None }
//!                 ◀── initialize() with a stored token
//! ```
//!
//! A stored token alone makes the session authenticated; the profile is resolved
//! later by `AuthService::resolve_profile`. `login` does not touch storage (the
//! auth flow saves the token first); `logout` clears it.
//!
//! ## Notifications
//!
//! Every `login` and `logout` emits exactly once, synchronously and in call
//! order, even when the authentication flag does not change. Subscribers get the
//! current value immediately on subscribing.

use std::rc::Rc;

use store::{Credentials, User};

use crate::observable::{Observable, Watch};

/// The client's belief about the current user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

struct SessionInner {
    credentials: Credentials,
    authenticated: Observable<bool>,
    session: Observable<Session>,
}

/// Shared handle to the session state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<SessionInner>,
}

impl SessionStore {
    /// Build the session from persisted storage: authenticated iff a token is
    /// stored, with the user left unresolved.
    pub fn initialize(credentials: Credentials) -> Self {
        let is_authenticated = credentials.is_present();
        tracing::debug!("Session initialized (authenticated: {})", is_authenticated);
        let session = Session {
            is_authenticated,
            user: None,
        };
        Self {
            inner: Rc::new(SessionInner {
                credentials,
                authenticated: Observable::new(is_authenticated),
                session: Observable::new(session),
            }),
        }
    }

    /// Mark the session authenticated as `user`.
    pub fn login(&self, user: User) {
        tracing::info!("Logged in as {}", user.name);
        self.transition(Session {
            is_authenticated: true,
            user: Some(user),
        });
    }

    /// Clear the stored token and the user.
    pub fn logout(&self) {
        tracing::info!("Logged out");
        self.inner.credentials.clear();
        self.transition(Session::default());
    }

    fn transition(&self, next: Session) {
        let is_authenticated = next.is_authenticated;
        self.inner.session.set(next);
        self.inner.authenticated.set(is_authenticated);
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.authenticated.get()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.session.get().user
    }

    pub fn session(&self) -> Session {
        self.inner.session.get()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// Authentication flag: current value now, then every emission.
    pub fn observe_authenticated(&self) -> Watch<bool> {
        self.inner.authenticated.subscribe()
    }

    /// Whole session value: current value now, then every emission.
    pub fn observe(&self) -> Watch<Session> {
        self.inner.session.subscribe()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.session())
            .finish()
    }
}
