//! # Transports: how a [`Request`] reaches the server
//!
//! [`Transport`] is the async seam between the typed client and the network.
//! Stages compose by wrapping: [`AuthenticatedTransport`] runs every request
//! through a [`RequestAuthenticator`] before delegating to the inner transport,
//! which in production is the reqwest-backed [`HttpTransport`] (the browser
//! `fetch` API on wasm32, hyper on native).
//!
//! A transport only fails when no response was obtained
//! ([`ApiError::Transport`]); non-success statuses are returned as ordinary
//! [`Response`]s and classified by the client.

use crate::authenticator::RequestAuthenticator;
use crate::error::ApiError;
use crate::request::{Method, Request, Response};

/// Async request executor.
pub trait Transport {
    fn send(
        &self,
        request: Request,
    ) -> impl std::future::Future<Output = Result<Response, ApiError>>;
}

/// HTTP transport backed by `reqwest`.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        tracing::debug!("{} {}", request.method, request.url);

        let mut builder = self.client.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Response { status, body })
    }
}

/// Middleware stage that authenticates requests before handing them on.
#[derive(Clone, Debug)]
pub struct AuthenticatedTransport<T> {
    inner: T,
    authenticator: RequestAuthenticator,
}

impl<T: Transport> AuthenticatedTransport<T> {
    pub fn new(inner: T, authenticator: RequestAuthenticator) -> Self {
        Self {
            inner,
            authenticator,
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Transport> Transport for AuthenticatedTransport<T> {
    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let request = self.authenticator.authenticate(request);
        self.inner.send(request).await
    }
}
