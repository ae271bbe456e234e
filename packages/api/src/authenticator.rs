//! # Request authentication: bearer token injection
//!
//! [`RequestAuthenticator`] decorates outbound requests with
//! `Authorization: Bearer <token>`, reading the token from the persisted
//! [`Credentials`] slot at the moment the request is sent.
//!
//! Requests whose URL contains one of the anonymous substrings (`/login` and
//! `/register` by default) are passed through untouched, whether or not a token
//! is stored. Without a token every request is passed through untouched and the
//! server answers with its own authorization error.
//!
//! The transform is pure and synchronous: it never fails, never blocks, never
//! retries. [`authorize`] is the stateless core; the struct only binds it to a
//! credential source and an exclusion list.

use store::Credentials;

use crate::request::Request;

/// URL substrings that must stay anonymous.
pub const DEFAULT_ANONYMOUS_PATHS: [&str; 2] = ["/login", "/register"];

pub const AUTHORIZATION: &str = "Authorization";

/// Attach `token` as a bearer credential unless `request.url` contains one of
/// `anonymous_paths`.
pub fn authorize<S: AsRef<str>>(
    request: Request,
    token: Option<&str>,
    anonymous_paths: &[S],
) -> Request {
    if anonymous_paths
        .iter()
        .any(|path| request.url.contains(path.as_ref()))
    {
        return request;
    }
    match token {
        Some(token) => request.with_header(AUTHORIZATION, format!("Bearer {token}")),
        None => request,
    }
}

/// Middleware stage that injects the stored bearer token.
#[derive(Clone, Debug)]
pub struct RequestAuthenticator {
    credentials: Credentials,
    anonymous_paths: Vec<String>,
}

impl RequestAuthenticator {
    /// Authenticator with the default `/login` + `/register` exclusions.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_anonymous_paths(credentials, DEFAULT_ANONYMOUS_PATHS)
    }

    pub fn with_anonymous_paths<I, S>(credentials: Credentials, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            credentials,
            anonymous_paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn anonymous_paths(&self) -> &[String] {
        &self.anonymous_paths
    }

    /// Whether `url` is exempt from authentication.
    pub fn is_anonymous(&self, url: &str) -> bool {
        self.anonymous_paths.iter().any(|p| url.contains(p.as_str()))
    }

    /// Decorate `request` with the current token, if any.
    pub fn authenticate(&self, request: Request) -> Request {
        let token = self.credentials.token();
        authorize(request, token.as_deref(), self.anonymous_paths.as_slice())
    }
}
