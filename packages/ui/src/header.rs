use dioxus::prelude::*;

use crate::auth::LogoutButton;
use crate::hooks::use_session;

/// Top bar: brand, navigation links and the logout button once logged in.
#[component]
pub fn Header() -> Element {
    let session = use_session();
    let profile_label = session()
        .user
        .map(|u| u.name)
        .unwrap_or_else(|| "Profile".to_string());

    rsx! {
        header {
            class: "header",
            style: "display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; border-bottom: 1px solid #e5e5e5;",

            span {
                style: "font-weight: 700; font-size: 1.25rem; color: #000000;",
                "MDD"
            }

            if session().is_authenticated {
                nav {
                    style: "display: flex; align-items: center; gap: 1.5rem;",
                    a { href: "/posts", "Posts" }
                    a { href: "/subjects", "Subjects" }
                    a { href: "/profile", "{profile_label}" }
                    LogoutButton { label: "Log out", class: "logout-btn" }
                }
            }
        }
    }
}
