//! Profile page: edit account details, manage subscriptions.

use api::RegisterRequest;
use dioxus::prelude::*;

use crate::auth::{describe_error, LogoutButton};
use crate::hooks::{use_services, use_session};
use crate::subscriptions::SubjectView;
use crate::views::subject_list::SubjectCards;
use crate::views::FORM_CSS;

#[component]
pub fn ProfileView() -> Element {
    let services = use_services();
    let session = use_session();
    let current = session().user;

    let mut name = use_signal(|| current.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let mut email = use_signal(|| current.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let mut password = use_signal(String::new);
    let mut status = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    // The profile may resolve after the first render.
    use_effect(move || {
        if let Some(user) = session().user {
            if name.peek().is_empty() && email.peek().is_empty() {
                name.set(user.name);
                email.set(user.email);
            }
        }
    });

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        async move {
            let request = RegisterRequest {
                name: name(),
                email: email(),
                password: password(),
            };
            saving.set(true);
            match services.auth().update_profile(&request).await {
                Ok(_) => {
                    password.set(String::new());
                    status.set(Some("Profile saved".to_string()));
                }
                Err(e) => status.set(Some(describe_error(&e))),
            }
            saving.set(false);
        }
    };

    rsx! {
        div {
            class: "profile-container",
            h1 { "User profile" }
            form {
                class: "auth-form",
                onsubmit: onsubmit,
                label { "Username" }
                input {
                    r#type: "text",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                label { "E-mail" }
                input {
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { "Password" }
                input {
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                {status().map(|message| rsx! {
                    p { class: "profile-status", "{message}" }
                })}
                button {
                    r#type: "submit",
                    disabled: saving() || password().is_empty(),
                    "Save"
                }
            }
            LogoutButton { label: "Log out", class: "logout-btn" }

            hr {}
            h2 { "Subscriptions" }
            SubjectCards { view: SubjectView::Subscribed }
        }
        style { {FORM_CSS} }
    }
}
