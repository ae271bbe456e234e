use dioxus::prelude::*;
use ui::views::SubjectList;
use ui::{Header, RequireAuth};

#[component]
pub fn Subjects() -> Element {
    rsx! {
        RequireAuth {
            Header {}
            main {
                style: "padding: 2rem;",
                SubjectList {}
            }
        }
    }
}
