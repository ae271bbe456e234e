//! Registration page view.

use dioxus::prelude::*;
use ui::views::RegisterForm;
use ui::{Header, RequireAnonymous};

/// Register page component. Authenticated visitors are sent to the landing page.
#[component]
pub fn Register() -> Element {
    rsx! {
        RequireAnonymous {
            Header {}
            RegisterForm {}
            p {
                class: "auth-switch",
                style: "text-align: center;",
                "Already registered? "
                Link { to: crate::Route::Login {}, "Log in" }
            }
        }
    }
}
