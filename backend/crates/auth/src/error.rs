//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Validation failures carry the offending field so the response body
//! can key the message by field, matching the API contract.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::{EmailError, RoleParseError, UsernameError};

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Username already exists
    #[error("A user with this username already exists")]
    UsernameTaken,

    /// Email already exists
    #[error("A user with this email already exists")]
    EmailTaken,

    /// Username failed validation
    #[error("{0}")]
    InvalidUsername(#[from] UsernameError),

    /// Email failed validation
    #[error("{0}")]
    InvalidEmail(#[from] EmailError),

    /// Unknown role code in a request
    #[error("{0}")]
    InvalidRole(#[from] RoleParseError),

    /// Confirmation code did not match the user's current state
    #[error("Invalid confirmation code")]
    InvalidCode,

    /// Permission denied by the policy evaluator
    #[error("You do not have permission to perform this action")]
    Forbidden,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UsernameTaken
            | AuthError::EmailTaken
            | AuthError::InvalidUsername(_)
            | AuthError::InvalidEmail(_)
            | AuthError::InvalidRole(_)
            | AuthError::InvalidCode => ErrorKind::BadRequest,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// The request field the error is keyed by, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AuthError::UsernameTaken | AuthError::InvalidUsername(_) => Some("username"),
            AuthError::EmailTaken | AuthError::InvalidEmail(_) => Some("email"),
            AuthError::InvalidRole(_) => Some("role"),
            AuthError::InvalidCode => Some("confirmation_code"),
            _ => None,
        }
    }

    /// Convert to AppError
    ///
    /// Database errors go through the kernel sqlx conversion so that a
    /// unique violation slipping past a pre-check still maps to the same
    /// field-keyed validation shape.
    pub fn to_app_error(self) -> AppError {
        match self {
            AuthError::Database(err) => AppError::from(err),
            other => {
                let message = other.to_string();
                match other.field() {
                    Some(field) => AppError::validation(field, message),
                    None => AppError::new(other.kind(), message),
                }
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCode => {
                tracing::warn!("Confirmation code mismatch");
            }
            AuthError::Forbidden => {
                tracing::warn!("Permission denied");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys() {
        assert_eq!(AuthError::UsernameTaken.field(), Some("username"));
        assert_eq!(AuthError::EmailTaken.field(), Some("email"));
        assert_eq!(AuthError::InvalidCode.field(), Some("confirmation_code"));
        assert_eq!(AuthError::UserNotFound.field(), None);
        assert_eq!(AuthError::Forbidden.field(), None);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::UserNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(AuthError::InvalidCode.kind(), ErrorKind::BadRequest);
        assert_eq!(AuthError::Forbidden.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_to_app_error_keeps_field() {
        let app = AuthError::EmailTaken.to_app_error();
        assert_eq!(app.kind(), ErrorKind::BadRequest);
        assert_eq!(app.field(), Some("email"));
    }
}
