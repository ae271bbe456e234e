//! # Client configuration: `mdd.toml`
//!
//! Everything the client needs to know about its environment: where the API
//! lives, which storage key holds the credential, which URLs must stay
//! anonymous, and where the guards redirect to.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api"
//!
//! [session]
//! token_key = "token"
//!
//! [auth]
//! anonymous_paths = ["/login", "/register"]
//!
//! [routes]
//! login = "/login"     # where AuthGuard sends anonymous users
//! landing = "/posts"   # where UnauthGuard sends authenticated users
//! ```
//!
//! Every section and field has a default, so a missing or empty document is
//! equivalent to [`ClientConfig::default`].

use serde::{Deserialize, Serialize};

use crate::credentials::DEFAULT_TOKEN_KEY;

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// REST API location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Persisted session settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage key under which the bearer token is kept.
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

/// Request authentication settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// URL substrings that never receive an `Authorization` header.
    #[serde(default = "default_anonymous_paths")]
    pub anonymous_paths: Vec<String>,
}

/// Redirect targets used by the route guards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_login_route")]
    pub login: String,
    #[serde(default = "default_landing_route")]
    pub landing: String,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_token_key() -> String {
    DEFAULT_TOKEN_KEY.to_string()
}

fn default_anonymous_paths() -> Vec<String> {
    vec!["/login".to_string(), "/register".to_string()]
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_landing_route() -> String {
    "/posts".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            anonymous_paths: default_anonymous_paths(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: default_login_route(),
            landing: default_landing_route(),
        }
    }
}

impl ClientConfig {
    /// Builder method to point the client at another API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Builder method to change the token storage key.
    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.session.token_key = key.into();
        self
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
