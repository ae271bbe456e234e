//! # Typed MDD REST client
//!
//! [`ApiClient`] turns the REST endpoints into typed async methods. It builds
//! [`Request`]s, hands them to a [`Transport`] and classifies the response:
//! a `2xx` body is decoded as JSON, anything else becomes an [`ApiError`] via
//! [`ApiError::from_status`].
//!
//! | Method | Endpoint | Returns |
//! |--------|----------|---------|
//! | [`register`](ApiClient::register) | `POST /register` | [`AuthSuccess`] |
//! | [`login`](ApiClient::login) | `POST /login` | [`AuthSuccess`] |
//! | [`update_user`](ApiClient::update_user) | `PUT /user` | [`AuthSuccess`] |
//! | [`current_user`](ApiClient::current_user) | `GET /currentUser` | [`User`] |
//! | [`subjects`](ApiClient::subjects) | `GET /subjects` | `Vec<Subject>` |
//! | [`user_subscriptions`](ApiClient::user_subscriptions) | `GET /subscriptions/user` | `Vec<Subscription>` |
//! | [`subscribe`](ApiClient::subscribe) | `POST /subscriptions` | `()` |
//! | [`unsubscribe`](ApiClient::unsubscribe) | `DELETE /subscriptions/{subjectId}` | `()` |
//!
//! The client does not authenticate requests itself; compose it over an
//! [`crate::AuthenticatedTransport`] for that.

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{AuthSuccess, LoginRequest, RegisterRequest, Subject, Subscription, User};

use crate::error::ApiError;
use crate::request::{Request, Response};
use crate::transport::Transport;

/// Typed client over a [`Transport`].
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn json_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
        serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn execute(&self, request: Request) -> Result<Response, ApiError> {
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(response.status, &response.body))
        }
    }

    async fn fetch<R: DeserializeOwned>(&self, request: Request) -> Result<R, ApiError> {
        let response = self.execute(request).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Create an account. The returned token authenticates the new user.
    pub async fn register(&self, body: &RegisterRequest) -> Result<AuthSuccess, ApiError> {
        let request = Request::post(self.url("/register")).with_json(Self::json_body(body)?);
        self.fetch(request).await
    }

    /// Authenticate with an e-mail or user name and a password.
    pub async fn login(&self, body: &LoginRequest) -> Result<AuthSuccess, ApiError> {
        let request = Request::post(self.url("/login")).with_json(Self::json_body(body)?);
        self.fetch(request).await
    }

    /// Update the caller's profile. The server issues a fresh token.
    pub async fn update_user(&self, body: &RegisterRequest) -> Result<AuthSuccess, ApiError> {
        let request = Request::put(self.url("/user")).with_json(Self::json_body(body)?);
        self.fetch(request).await
    }

    /// Resolve the profile behind the current token.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.fetch(Request::get(self.url("/currentUser"))).await
    }

    pub async fn subjects(&self) -> Result<Vec<Subject>, ApiError> {
        self.fetch(Request::get(self.url("/subjects"))).await
    }

    /// The caller's subscriptions. The server answers `204 No Content` when
    /// there are none.
    pub async fn user_subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        let response = self
            .execute(Request::get(self.url("/subscriptions/user")))
            .await?;
        if response.status == 204 || response.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Subscribe the caller to `subject_id`. The body is the bare id.
    pub async fn subscribe(&self, subject_id: i64) -> Result<(), ApiError> {
        let request = Request::post(self.url("/subscriptions")).with_json(subject_id.to_string());
        self.execute(request).await.map(|_| ())
    }

    /// Remove the caller's subscription to `subject_id`.
    pub async fn unsubscribe(&self, subject_id: i64) -> Result<(), ApiError> {
        let request = Request::delete(self.url(&format!("/subscriptions/{subject_id}")));
        self.execute(request).await.map(|_| ())
    }
}
