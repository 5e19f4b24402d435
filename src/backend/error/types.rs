/**
 * Backend Error Types
 *
 * This module defines the single error type returned by every HTTP handler.
 * Each variant maps to one HTTP status and renders into the shared error
 * envelope `{ "errors": [{ "msg": ... }] }`.
 *
 * # Error Categories
 *
 * - `Validation` - one entry per failed field predicate (400)
 * - `Unauthorized` - missing/invalid token, bad credentials, not the author (401)
 * - `AlreadyExists` - registration with an email that is taken (401)
 * - `Conflict` - state conflicts such as liking a post twice (400)
 * - `NotFound` - a document lookup missed (404)
 * - `Database`, `Hash`, `Internal` - infrastructure failures (500)
 *
 * Infrastructure failures never leak their cause to the client; the cause is
 * logged when the response is built.
 */

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::backend::auth::sessions::TokenError;

/// One entry of the error envelope.
///
/// `param` and `location` are only set for field validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    /// Human-readable message
    pub msg: String,
    /// Name of the offending request field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    /// Where the field was read from (always `body` today)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'static str>,
}

impl ErrorDetail {
    /// Detail carrying only a message
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
            location: None,
        }
    }

    /// Detail for a failed body field
    pub fn field(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.into()),
            location: Some("body"),
        }
    }
}

/// Error returned by handlers and middleware
///
/// # Usage
///
/// ```rust
/// use social_backend::backend::error::BackendError;
///
/// let err = BackendError::not_found("No Post Found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// One or more required fields failed validation
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<ErrorDetail>),

    /// The caller is not authenticated or not allowed to act on the resource
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Registration collided with an existing identity
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The request conflicts with the current state of a document
    #[error("conflict: {0}")]
    Conflict(String),

    /// A document lookup missed
    #[error("not found: {0}")]
    NotFound(String),

    /// The path exists but not for this HTTP method
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Persistence failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Password hashing or verification failure
    #[error(transparent)]
    Hash(#[from] bcrypt::BcryptError),

    /// Any other server-side failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl BackendError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::MethodNotAllowed(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `Conflict` - 400 Bad Request
    /// - `Unauthorized`, `AlreadyExists` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - `MethodNotAllowed` - 405 Method Not Allowed
    /// - `Database`, `Hash`, `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) | Self::AlreadyExists(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Database(_) | Self::Hash(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Entries for the `errors` array of the response envelope
    pub fn details(&self) -> Vec<ErrorDetail> {
        match self {
            Self::Validation(details) => details.clone(),
            Self::Unauthorized(msg)
            | Self::AlreadyExists(msg)
            | Self::Conflict(msg)
            | Self::NotFound(msg)
            | Self::MethodNotAllowed(msg) => vec![ErrorDetail::message(msg.clone())],
            Self::Database(_) | Self::Hash(_) | Self::Internal(_) => {
                vec![ErrorDetail::message("Server Error")]
            }
        }
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidToken => Self::unauthorized("Invalid Token"),
            TokenError::Signing(e) => Self::internal(format!("failed to sign token: {e}")),
            TokenError::Lifetime => Self::internal("token lifetime out of range"),
        }
    }
}

/// True when the database rejected a write because of a UNIQUE constraint
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// True when a write referenced a row that no longer exists
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}
