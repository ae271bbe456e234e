use dioxus::prelude::*;
use ui::{use_session, Header, RequireAuth};

/// Landing page after login.
#[component]
pub fn Posts() -> Element {
    let session = use_session();
    let greeting = match session().user {
        Some(user) => format!("Welcome back, {}.", user.name),
        None => "Welcome back.".to_string(),
    };

    rsx! {
        RequireAuth {
            Header {}
            main {
                style: "padding: 2rem;",
                h1 { "Posts" }
                p { "{greeting}" }
                Link { to: crate::Route::Subjects {}, "Browse subjects" }
            }
        }
    }
}
