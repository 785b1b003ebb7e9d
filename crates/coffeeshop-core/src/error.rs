//! Error types for the coffeeshop toolkit.
//!
//! This module provides a unified error type with explicit variants for
//! transport, API, authorization, session, storage and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for coffeeshop operations.
///
/// Callers can match on the variant to tell a dropped connection apart from
/// a rejected request or an expired credential.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, malformed body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-2xx status other than 401.
    #[error("API error: {0}")]
    Api(ApiError),

    /// The API answered 401; the persisted session has been cleared.
    #[error("unauthorized: {0}")]
    Unauthorized(ApiError),

    /// Session-level failures surfaced by login and registration.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Local key-value persistence errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (bad URL, empty coffee name, ...).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the most useful human-readable message the server supplied, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Api(err) | Error::Unauthorized(err) => err.best_message(),
            _ => None,
        }
    }

    /// Returns the HTTP status of an API response, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) | Error::Unauthorized(err) => Some(err.status),
            _ => None,
        }
    }

    /// Returns true if the server rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized(_))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Session-level errors returned by login and registration.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login was rejected or could not complete.
    #[error("{message}")]
    LoginFailed {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Registration, or the login that follows it, did not complete.
    #[error("{message}")]
    RegistrationFailed {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// An operation needs a session and none is active.
    #[error("not logged in")]
    NotAuthenticated,

    /// An operation needs an administrator session.
    #[error("administrator privileges required")]
    AdminRequired,
}

impl AuthError {
    /// Fallback message used when the server does not explain a failed login.
    pub const LOGIN_FALLBACK: &'static str = "Login failed";

    /// Fallback message used when the server does not explain a failed registration.
    pub const REGISTRATION_FALLBACK: &'static str = "Registration failed";

    /// Build a login failure from the underlying error.
    pub fn login_failed(source: Error) -> Self {
        let message = source
            .server_message()
            .unwrap_or(Self::LOGIN_FALLBACK)
            .to_string();
        AuthError::LoginFailed {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Build a registration failure from the underlying error.
    pub fn registration_failed(source: Error) -> Self {
        let message = source
            .server_message()
            .unwrap_or(Self::REGISTRATION_FALLBACK)
            .to_string();
        AuthError::RegistrationFailed {
            message,
            source: Some(Box::new(source)),
        }
    }
}

/// A non-2xx response from the coffee shop API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// The `error` field of the JSON body, if present.
    pub error: Option<String>,
    /// The `message` field of the JSON body, if present.
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(message) = self.best_message() {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// The server puts its human-readable text in `error`; `message` is the fallback.
    pub fn best_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|m| !m.trim().is_empty())
    }

    /// Check if this is an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Local persistence errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Stored data could not be parsed.
    #[error("corrupt store at {path}: {message}")]
    Corrupt { path: String, message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A required field is missing or out of range.
    #[error("invalid {field}: {reason}")]
    Field { field: &'static str, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

impl InvalidInputError {
    pub(crate) fn field(field: &'static str, reason: impl Into<String>) -> Self {
        InvalidInputError::Field {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_message_prefers_error_field() {
        let err = ApiError::new(
            401,
            Some("Invalid username or password".to_string()),
            Some("ignored".to_string()),
        );
        assert_eq!(err.best_message(), Some("Invalid username or password"));
    }

    #[test]
    fn best_message_ignores_blank_text() {
        let err = ApiError::new(500, Some("  ".to_string()), None);
        assert_eq!(err.best_message(), None);
    }

    #[test]
    fn login_failed_uses_server_message() {
        let source = Error::Unauthorized(ApiError::new(
            401,
            Some("Invalid username or password".to_string()),
            None,
        ));
        let err = AuthError::login_failed(source);
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[test]
    fn login_failed_falls_back_without_server_message() {
        let source = Error::Transport(TransportError::Connection {
            message: "refused".to_string(),
        });
        let err = AuthError::login_failed(source);
        assert_eq!(err.to_string(), AuthError::LOGIN_FALLBACK);
    }

    #[test]
    fn registration_failed_falls_back_on_bare_status() {
        let source = Error::Api(ApiError::new(500, None, None));
        let err = AuthError::registration_failed(source);
        assert_eq!(err.to_string(), "Registration failed");
    }

    #[test]
    fn display_includes_status() {
        let err = ApiError::new(503, None, None);
        assert_eq!(err.to_string(), "HTTP 503");
    }
}
