use dioxus::prelude::*;
use ui::views::ProfileView;
use ui::{Header, RequireAuth};

#[component]
pub fn Profile() -> Element {
    rsx! {
        RequireAuth {
            Header {}
            ProfileView {}
        }
    }
}
