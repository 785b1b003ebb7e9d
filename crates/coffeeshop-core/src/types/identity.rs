//! User identity and account request types.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// The username treated as administrator when an identity is synthesized locally.
pub const ADMIN_USERNAME: &str = "admin";

/// Minimum password length accepted by [`RegisterRequest::validate`].
pub const MIN_PASSWORD_LEN: usize = 6;

/// The locally held profile of the logged-in user.
///
/// Serialized with snake_case fields; this is also the layout of the persisted
/// `user` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Identity {
    /// Build an identity for a freshly issued credential.
    ///
    /// The login endpoint returns only a token, so the profile is filled in
    /// locally: the id is 0, the email is empty, and only the username
    /// [`ADMIN_USERNAME`] is an administrator.
    pub fn synthesize(username: &str) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: 0,
            username: username.to_string(),
            email: String::new(),
            is_admin: username == ADMIN_USERNAME,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Request body for `/auth/register`.
///
/// The password is never exposed in Debug output.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl RegisterRequest {
    /// Create a new registration request.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            is_admin: None,
        }
    }

    /// Ask the server to create an administrator account.
    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = Some(is_admin);
        self
    }

    /// Returns the password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Check the form-level rules before contacting the server.
    pub fn validate(&self) -> Result<(), Error> {
        if self.username.trim().is_empty() {
            return Err(InvalidInputError::field("username", "must not be empty").into());
        }
        if !self.email.contains('@') {
            return Err(InvalidInputError::field("email", "must be an email address").into());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(InvalidInputError::field(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            )
            .into());
        }
        Ok(())
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

/// Response from `/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
}

/// Generic `{ "message": ... }` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
