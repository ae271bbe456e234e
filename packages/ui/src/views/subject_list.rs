//! Subject cards with optimistic subscribe / unsubscribe buttons.

use dioxus::prelude::*;
use store::Subject;

use crate::hooks::{use_services, use_watch};
use crate::subscriptions::SubjectView;

/// Every subject, each with a toggle for the caller's subscription.
#[component]
pub fn SubjectList() -> Element {
    rsx! {
        SubjectCards { view: SubjectView::All }
    }
}

/// Cards for the subjects in `view`. Used by [`SubjectList`] and the profile page.
#[component]
pub fn SubjectCards(view: SubjectView) -> Element {
    let services = use_services();
    let controller = use_hook(|| services.subjects(view));

    let source = controller.clone();
    let subjects = use_watch(Vec::new, move || source.observe());
    let mut load_error = use_signal(|| Option::<String>::None);

    let loader = controller.clone();
    use_future(move || {
        let controller = loader.clone();
        async move {
            if let Err(e) = controller.load_subjects().await {
                load_error.set(Some(e.to_string()));
            }
        }
    });

    let empty_message = match view {
        SubjectView::All => "No subjects yet.",
        SubjectView::Subscribed => "You are not subscribed to any subject.",
    };

    rsx! {
        div {
            class: "subject-grid",
            style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem;",

            {load_error().map(|message| rsx! {
                p { class: "subject-error", "{message}" }
            })}

            if subjects().is_empty() && load_error().is_none() {
                p { class: "subject-empty", "{empty_message}" }
            }

            for subject in subjects() {
                SubjectCard {
                    key: "{subject.id}",
                    subject: subject.clone(),
                    on_toggle: {
                        let controller = controller.clone();
                        move |subject: Subject| {
                            let controller = controller.clone();
                            spawn(async move {
                                if subject.is_subscribed() {
                                    controller.unsubscribe(subject.id).await;
                                } else {
                                    controller.subscribe(subject.id).await;
                                }
                            });
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn SubjectCard(subject: Subject, on_toggle: EventHandler<Subject>) -> Element {
    let subscribed = subject.is_subscribed();
    let (label, class) = if subscribed {
        ("Unsubscribe", "subject-btn subscribed")
    } else {
        ("Subscribe", "subject-btn")
    };
    let card = subject.clone();

    rsx! {
        div {
            class: "subject-card",
            style: "padding: 1rem; border-radius: 8px; background: #f5f5ff;",
            h3 { "{subject.title}" }
            p { "{subject.description}" }
            button {
                class: "{class}",
                onclick: move |_| on_toggle.call(card.clone()),
                "{label}"
            }
        }
    }
}
