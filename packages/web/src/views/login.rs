//! Login page view.

use dioxus::prelude::*;
use ui::views::LoginForm;
use ui::{Header, RequireAnonymous};

/// Login page component. Authenticated visitors are sent to the landing page.
#[component]
pub fn Login() -> Element {
    rsx! {
        RequireAnonymous {
            Header {}
            LoginForm {}
            p {
                class: "auth-switch",
                style: "text-align: center;",
                "No account yet? "
                Link { to: crate::Route::Register {}, "Register" }
            }
        }
    }
}
