//! Composition root shared by all platforms.
//!
//! [`AppServices`] wires the pieces together once per application:
//! one [`Credentials`] handle is shared by the [`SessionStore`] and the
//! [`RequestAuthenticator`], so a token saved by a login flow is attached to the
//! very next request and cleared for everyone on logout.
//!
//! The token is kept in a platform-appropriate store:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorage`]
//! - **Desktop / native**: one file per key under `<data_dir>/mdd/` via [`store::FileStore`]

use std::rc::Rc;

use api::{AuthenticatedTransport, HttpApiClient, HttpTransport, RequestAuthenticator};
use store::{ClientConfig, Credentials, KeyValueStore};

use crate::auth::AuthService;
use crate::guard::{AuthGuard, UnauthGuard};
use crate::session::SessionStore;
use crate::subscriptions::{MutationOrdering, OptimisticSubscriptionController, SubjectView};

/// Auth flows over the production transport.
pub type HttpAuthService = AuthService<AuthenticatedTransport<HttpTransport>>;

/// Create the platform-appropriate store for the credential.
pub fn make_token_store() -> impl KeyValueStore + 'static {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorage::new()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("mdd");
        store::FileStore::new(base)
    }
}

/// Everything a view needs, cheaply cloneable.
#[derive(Clone)]
pub struct AppServices {
    config: Rc<ClientConfig>,
    session: SessionStore,
    api: HttpApiClient,
}

impl AppServices {
    /// Build the services over the platform token store.
    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_store(config, make_token_store())
    }

    /// Build the services over an explicit token store.
    pub fn with_store(config: ClientConfig, store: impl KeyValueStore + 'static) -> Self {
        let credentials = Credentials::new(store, config.session.token_key.clone());
        let authenticator = RequestAuthenticator::with_anonymous_paths(
            credentials.clone(),
            config.auth.anonymous_paths.iter().cloned(),
        );
        let session = SessionStore::initialize(credentials);
        let api = api::http_client(config.api.base_url.clone(), authenticator);
        tracing::debug!("Services ready for {}", api.base_url());

        Self {
            config: Rc::new(config),
            session,
            api,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn api(&self) -> &HttpApiClient {
        &self.api
    }

    pub fn auth(&self) -> HttpAuthService {
        AuthService::new(self.api.clone(), self.session.clone())
    }

    pub fn auth_guard(&self) -> AuthGuard {
        AuthGuard::new(self.session.clone(), &self.config.routes)
    }

    pub fn unauth_guard(&self) -> UnauthGuard {
        UnauthGuard::new(self.session.clone(), &self.config.routes)
    }

    /// A fresh subject list for `view`.
    pub fn subjects(&self, view: SubjectView) -> OptimisticSubscriptionController<HttpApiClient> {
        OptimisticSubscriptionController::with_ordering(
            self.api.clone(),
            view,
            MutationOrdering::default(),
        )
    }
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
    }
}
