use dioxus::prelude::*;

use store::ClientConfig;
use ui::SessionProvider;
use views::{Login, Posts, Profile, Register, Subjects};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/posts")]
    Posts {},
    #[route("/subjects")]
    Subjects {},
    #[route("/profile")]
    Profile {},
}

/// Bundled `mdd.toml`.
const CONFIG_TOML: &str = include_str!("../mdd.toml");

/// Parse the bundled configuration, falling back to defaults when it is
/// malformed. `api_url` (from `MDD_API_URL` at build time) wins over the file.
fn load_config(text: &str, api_url: Option<&str>) -> ClientConfig {
    let config = ClientConfig::from_toml(text).unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed mdd.toml: {}", e);
        ClientConfig::default()
    });
    match api_url {
        Some(url) if !url.is_empty() => config.with_base_url(url),
        _ => config,
    }
}

fn client_config() -> ClientConfig {
    load_config(CONFIG_TOML, option_env!("MDD_API_URL"))
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        SessionProvider {
            config: client_config(),
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/posts`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Posts {});
    rsx! {}
}
