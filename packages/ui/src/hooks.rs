//! Hooks bridging the reactive core into Dioxus signals.

use dioxus::prelude::*;
use futures::StreamExt;

use crate::observable::Watch;
use crate::services::AppServices;
use crate::session::Session;

/// Mirror a [`Watch`] into a signal owned by the calling component.
///
/// `init` seeds the signal; `source` is subscribed once, on first render, and
/// the forwarding task is dropped with the component.
pub fn use_watch<T: Clone + 'static>(
    init: impl FnOnce() -> T,
    source: impl FnOnce() -> Watch<T>,
) -> Signal<T> {
    let mut value = use_signal(init);
    use_hook(move || {
        let mut watch = source();
        spawn(async move {
            while let Some(next) = watch.next().await {
                value.set(next);
            }
        });
    });
    value
}

/// The services provided by [`crate::SessionProvider`].
pub fn use_services() -> AppServices {
    use_context::<AppServices>()
}

/// The current session. Updates on every login and logout.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}
