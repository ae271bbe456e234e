//! Login form.

use api::LoginRequest;
use dioxus::prelude::*;

use crate::auth::describe_error;
use crate::hooks::use_services;
use crate::views::FORM_CSS;

/// Email-or-username + password form. Navigates to the landing route on success.
#[component]
pub fn LoginForm() -> Element {
    let services = use_services();
    let nav = use_navigator();
    let mut identifier = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        async move {
            let request = LoginRequest {
                identifier: identifier(),
                password: password(),
            };
            submitting.set(true);
            match services.auth().login(&request).await {
                Ok(_) => {
                    error.set(None);
                    nav.replace(services.config().routes.landing.clone());
                }
                Err(e) => error.set(Some(describe_error(&e))),
            }
            submitting.set(false);
        }
    };

    rsx! {
        div {
            class: "auth-container",
            h1 { "Log in" }
            form {
                class: "auth-form",
                onsubmit: onsubmit,
                label { "E-mail or username" }
                input {
                    id: "identifier",
                    r#type: "text",
                    value: "{identifier}",
                    oninput: move |evt| identifier.set(evt.value()),
                }
                label { "Password" }
                input {
                    id: "password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                {error().map(|message| rsx! {
                    p { class: "auth-error", "{message}" }
                })}
                button {
                    r#type: "submit",
                    disabled: submitting() || identifier().is_empty() || password().is_empty(),
                    "Log in"
                }
            }
        }
        style { {FORM_CSS} }
    }
}
