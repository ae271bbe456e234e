//! Route guards.
//!
//! Two complementary predicates consulted before a route renders:
//! [`AuthGuard`] lets authenticated users through and sends everyone else to
//! the login route; [`UnauthGuard`] keeps authenticated users out of the login
//! and registration pages by sending them to the landing route.
//!
//! Both read the cached [`SessionStore`] value only. A session restored from a
//! stored token whose profile has not been fetched yet counts as authenticated,
//! so a reload on a protected page does not bounce through the login page.

use store::config::RoutesConfig;

use crate::session::SessionStore;

/// Outcome of a guard check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Where a blocked navigation is sent.
pub trait Navigator {
    fn redirect(&self, route: &str);
}

pub trait RouteGuard {
    /// Decide from the current session, without side effects.
    fn decide(&self) -> GuardDecision;

    /// Decide, performing the redirect through `navigator` when blocked.
    fn can_activate(&self, navigator: &dyn Navigator) -> bool {
        match self.decide() {
            GuardDecision::Allow => true,
            GuardDecision::Redirect(route) => {
                navigator.redirect(&route);
                false
            }
        }
    }
}

/// Allows authenticated sessions only.
#[derive(Clone, Debug)]
pub struct AuthGuard {
    session: SessionStore,
    login_route: String,
}

impl AuthGuard {
    pub fn new(session: SessionStore, routes: &RoutesConfig) -> Self {
        Self {
            session,
            login_route: routes.login.clone(),
        }
    }
}

impl RouteGuard for AuthGuard {
    fn decide(&self) -> GuardDecision {
        if self.session.is_authenticated() {
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect(self.login_route.clone())
        }
    }
}

/// Allows anonymous sessions only.
#[derive(Clone, Debug)]
pub struct UnauthGuard {
    session: SessionStore,
    landing_route: String,
}

impl UnauthGuard {
    pub fn new(session: SessionStore, routes: &RoutesConfig) -> Self {
        Self {
            session,
            landing_route: routes.landing.clone(),
        }
    }
}

impl RouteGuard for UnauthGuard {
    fn decide(&self) -> GuardDecision {
        if self.session.is_authenticated() {
            GuardDecision::Redirect(self.landing_route.clone())
        } else {
            GuardDecision::Allow
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use store::{Credentials, MemoryStore, User};

    #[derive(Default)]
    struct RecordingNavigator {
        redirects: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn redirect(&self, route: &str) {
            self.redirects.borrow_mut().push(route.to_string());
        }
    }

    fn session(token: Option<&str>) -> SessionStore {
        let store = match token {
            Some(t) => MemoryStore::with_entry("token", t),
            None => MemoryStore::new(),
        };
        SessionStore::initialize(Credentials::with_default_key(store))
    }

    fn guards(session: &SessionStore) -> (AuthGuard, UnauthGuard) {
        let routes = RoutesConfig::default();
        (
            AuthGuard::new(session.clone(), &routes),
            UnauthGuard::new(session.clone(), &routes),
        )
    }

    #[test]
    fn test_anonymous_session() {
        let session = session(None);
        let (auth, unauth) = guards(&session);
        let nav = RecordingNavigator::default();

        assert!(!auth.can_activate(&nav));
        assert!(unauth.can_activate(&nav));
        assert_eq!(*nav.redirects.borrow(), vec!["/login".to_string()]);
    }

    #[test]
    fn test_authenticated_session() {
        let session = session(None);
        session.login(User {
            id: 1,
            name: "ada".into(),
            email: "ada@example.com".into(),
        });
        let (auth, unauth) = guards(&session);
        let nav = RecordingNavigator::default();

        assert!(auth.can_activate(&nav));
        assert!(!unauth.can_activate(&nav));
        assert_eq!(*nav.redirects.borrow(), vec!["/posts".to_string()]);
    }

    #[test]
    fn test_unresolved_profile_counts_as_authenticated() {
        // Token restored from storage, `/currentUser` not answered yet.
        let session = session(Some("jwt"));
        assert!(session.user().is_none());
        let (auth, unauth) = guards(&session);

        assert_eq!(auth.decide(), GuardDecision::Allow);
        assert_eq!(unauth.decide(), GuardDecision::Redirect("/posts".into()));
    }

    #[test]
    fn test_guards_are_complementary() {
        let session = session(None);
        let (auth, unauth) = guards(&session);
        for step in 0..4 {
            if step % 2 == 0 {
                session.login(User {
                    id: 2,
                    name: "bob".into(),
                    email: "bob@example.com".into(),
                });
            } else {
                session.logout();
            }
            assert_ne!(auth.decide().is_allowed(), unauth.decide().is_allowed());
        }
    }

    #[test]
    fn test_decision_follows_logout() {
        let session = session(Some("jwt"));
        let (auth, _) = guards(&session);
        assert!(auth.decide().is_allowed());
        session.logout();
        assert_eq!(auth.decide(), GuardDecision::Redirect("/login".into()));
    }

    #[test]
    fn test_custom_routes() {
        let session = session(Some("jwt"));
        let routes = RoutesConfig {
            login: "/signin".into(),
            landing: "/feed".into(),
        };
        let unauth = UnauthGuard::new(session.clone(), &routes);
        assert_eq!(unauth.decide(), GuardDecision::Redirect("/feed".into()));
        session.logout();
        let auth = AuthGuard::new(session, &routes);
        assert_eq!(auth.decide(), GuardDecision::Redirect("/signin".into()));
    }
}
