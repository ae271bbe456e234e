//! Account creation form.

use api::RegisterRequest;
use dioxus::prelude::*;

use crate::auth::describe_error;
use crate::hooks::use_services;
use crate::views::FORM_CSS;

/// Name + email + password form. Logs the new account in and navigates to the
/// landing route on success.
#[component]
pub fn RegisterForm() -> Element {
    let services = use_services();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        async move {
            let request = RegisterRequest {
                name: name(),
                email: email(),
                password: password(),
            };
            submitting.set(true);
            match services.auth().register(&request).await {
                Ok(_) => {
                    error.set(None);
                    nav.replace(services.config().routes.landing.clone());
                }
                Err(e) => error.set(Some(describe_error(&e))),
            }
            submitting.set(false);
        }
    };

    let incomplete = name().is_empty() || email().is_empty() || password().is_empty();

    rsx! {
        div {
            class: "auth-container",
            h1 { "Register" }
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
                {error().map(|message| rsx! {
                    p { class: "auth-error", "{message}" }
                })}
                button {
                    r#type: "submit",
                    disabled: submitting() || incomplete,
                    "Create account"
                }
            }
        }
        style { {FORM_CSS} }
    }
}
