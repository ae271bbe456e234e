//! Authentication flows and the session context for the UI.
//!
//! [`AuthService`] runs the credential exchanges against the API and feeds the
//! outcome into the [`SessionStore`]:
//!
//! ```text
//! login / register / update_profile
//!   POST|PUT ──▶ { token } ──▶ Credentials::save ──▶ GET /currentUser ──▶ SessionStore::login
//! ```
//!
//! A refused exchange writes nothing. If the profile lookup fails after a token
//! was saved, the token stays and the session is left as it was. Until the
//! next start-up (or a successful [`AuthService::resolve_profile`]) a fresh
//! login in that state has a stored token while
//! [`SessionStore::is_authenticated`] is still `false`.

use api::{ApiClient, ApiError, AuthSuccess, LoginRequest, RegisterRequest, Transport, User};
use dioxus::prelude::*;
use store::ClientConfig;

use crate::hooks::{use_services, use_watch};
use crate::services::AppServices;
use crate::session::SessionStore;

/// Credential exchanges that drive the session.
#[derive(Clone, Debug)]
pub struct AuthService<T> {
    client: ApiClient<T>,
    session: SessionStore,
}

impl<T: Transport> AuthService<T> {
    pub fn new(client: ApiClient<T>, session: SessionStore) -> Self {
        Self { client, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        let auth = self
            .client
            .login(request)
            .await
            .inspect_err(|e| tracing::warn!("Login failed for {}: {}", request.identifier, e))?;
        self.establish(auth).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let auth = self
            .client
            .register(request)
            .await
            .inspect_err(|e| tracing::warn!("Registration failed for {}: {}", request.email, e))?;
        self.establish(auth).await
    }

    /// Update name, email and password. The server issues a new token.
    pub async fn update_profile(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let auth = self
            .client
            .update_user(request)
            .await
            .inspect_err(|e| tracing::warn!("Profile update failed: {}", e))?;
        self.establish(auth).await
    }

    /// Fetch the profile for the stored token and mark the session logged in.
    pub async fn resolve_profile(&self) -> Result<User, ApiError> {
        let user = self
            .client
            .current_user()
            .await
            .inspect_err(|e| tracing::warn!("Failed to resolve profile: {}", e))?;
        self.session.login(user.clone());
        Ok(user)
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    async fn establish(&self, auth: AuthSuccess) -> Result<User, ApiError> {
        self.session.credentials().save(&auth.token);
        self.resolve_profile().await
    }
}

/// Human-readable message for a failed form submission.
pub fn describe_error(error: &ApiError) -> String {
    if error.is_auth_failure() {
        "Invalid credentials".to_string()
    } else {
        error.to_string()
    }
}

/// Provider component that owns the services and the session signal.
/// Wrap your app with this component.
#[component]
pub fn SessionProvider(config: ClientConfig, children: Element) -> Element {
    let services = use_context_provider(|| AppServices::from_config(config));

    let session = services.session().clone();
    let seed = session.clone();
    let signal = use_watch(move || seed.session(), move || session.observe());
    use_context_provider(|| signal);

    // A token restored from storage still needs its profile.
    use_hook(|| {
        let services = services.clone();
        if services.session().is_authenticated() && services.session().user().is_none() {
            spawn(async move {
                let _ = services.auth().resolve_profile().await;
            });
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_services();
    let nav = use_navigator();

    let onclick = move |_| {
        services.auth().logout();
        nav.replace(services.config().routes.login.clone());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
