//! Router-facing wrappers around the route guards.

use dioxus::prelude::*;

use crate::guard::{self, RouteGuard};
use crate::hooks::{use_services, use_session};

/// Performs guard redirects through the Dioxus router.
#[derive(Clone, Copy)]
pub struct RouterNavigator(pub Navigator);

impl guard::Navigator for RouterNavigator {
    fn redirect(&self, route: &str) {
        self.0.replace(route.to_string());
    }
}

/// Renders `children` for authenticated sessions; redirects to the login route
/// otherwise.
#[component]
pub fn RequireAuth(children: Element) -> Element {
    let services = use_services();
    // Re-render on login/logout.
    let _session = use_session()();
    let navigator = RouterNavigator(use_navigator());

    if services.auth_guard().can_activate(&navigator) {
        rsx! {
            {children}
        }
    } else {
        rsx! {}
    }
}

/// Renders `children` for anonymous sessions; redirects to the landing route
/// otherwise.
#[component]
pub fn RequireAnonymous(children: Element) -> Element {
    let services = use_services();
    let _session = use_session()();
    let navigator = RouterNavigator(use_navigator());

    if services.unauth_guard().can_activate(&navigator) {
        rsx! {
            {children}
        }
    } else {
        rsx! {}
    }
}
