//! # Domain models shared by the API client and the UI
//!
//! These mirror the JSON payloads of the MDD REST API. Field names are
//! camelCase on the wire (`subjectId`, `subscriptionByUser`) and snake_case in
//! Rust. Unknown fields sent by the server (timestamps, nested post or comment
//! collections) are ignored on deserialisation.
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The authenticated user's profile, as returned by `/currentUser`. |
//! | [`Subject`] | A topical category. `subscription_by_user` is a *local* annotation, never trusted from the server. |
//! | [`Subscription`] | A user → subject link. [`Subscription::pending`] builds the speculative sentinel. |
//! | [`AuthSuccess`] | `{ token }` body returned by login, register and profile update. |
//! | [`LoginRequest`] / [`RegisterRequest`] | Request bodies for the auth endpoints. |

use serde::{Deserialize, Serialize};

/// Profile of the authenticated user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A record linking a user to a subject they follow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    pub subject_id: i64,
    pub user_id: i64,
}

impl Subscription {
    /// Speculative placeholder shown while a subscribe request is in flight.
    pub fn pending(subject_id: i64) -> Self {
        Self {
            id: 0,
            subject_id,
            user_id: 0,
        }
    }

    /// Whether this is the placeholder rather than a server-issued record.
    pub fn is_pending(&self) -> bool {
        self.id == 0 && self.user_id == 0
    }
}

/// A topical category posts belong to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Locally computed: the caller's subscription to this subject, if any.
    #[serde(default)]
    pub subscription_by_user: Option<Subscription>,
}

impl Subject {
    pub fn new(id: i64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            subscription_by_user: None,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription_by_user.is_some()
    }
}

/// Successful authentication response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSuccess {
    pub token: String,
}

/// Login body. `identifier` is either the e-mail or the user name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Registration and profile-update body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}
