//! Reviews Error Types
//!
//! Error variants for the catalog and content modules, integrating with
//! the unified `kernel::error::AppError` system. Validation failures
//! carry the offending field for field-keyed response bodies.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::{ScoreOutOfRange, SlugError, YearError};

/// Reviews-specific result type alias
pub type ReviewsResult<T> = Result<T, ReviewsError>;

/// Reviews-specific error variants
#[derive(Debug, Error)]
pub enum ReviewsError {
    /// Category not found
    #[error("Category not found")]
    CategoryNotFound,

    /// Genre not found
    #[error("Genre not found")]
    GenreNotFound,

    /// Title not found
    #[error("Title not found")]
    TitleNotFound,

    /// Review not found
    #[error("Review not found")]
    ReviewNotFound,

    /// Comment not found
    #[error("Comment not found")]
    CommentNotFound,

    /// Slug failed validation
    #[error("{0}")]
    InvalidSlug(#[from] SlugError),

    /// Slug already in use within the resource
    #[error("This slug is already in use")]
    SlugTaken,

    /// Score outside `1..=10`
    #[error("{0}")]
    InvalidScore(#[from] ScoreOutOfRange),

    /// Year outside `0..=current`
    #[error("{0}")]
    InvalidYear(#[from] YearError),

    /// A named field failed validation
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Second review by the same author for the same title
    #[error("You have already reviewed this title")]
    DuplicateReview,

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

impl ReviewsError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReviewsError::CategoryNotFound
            | ReviewsError::GenreNotFound
            | ReviewsError::TitleNotFound
            | ReviewsError::ReviewNotFound
            | ReviewsError::CommentNotFound => ErrorKind::NotFound,
            ReviewsError::InvalidSlug(_)
            | ReviewsError::SlugTaken
            | ReviewsError::InvalidScore(_)
            | ReviewsError::InvalidYear(_)
            | ReviewsError::Validation { .. }
            | ReviewsError::DuplicateReview => ErrorKind::BadRequest,
            ReviewsError::Forbidden => ErrorKind::Forbidden,
            ReviewsError::Database(_) | ReviewsError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// The request field the error is keyed by, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ReviewsError::InvalidSlug(_) | ReviewsError::SlugTaken => Some("slug"),
            ReviewsError::InvalidScore(_) => Some("score"),
            ReviewsError::InvalidYear(_) => Some("year"),
            ReviewsError::Validation { field, .. } => Some(field),
            ReviewsError::DuplicateReview => Some("title"),
            _ => None,
        }
    }

    /// Convert to AppError
    ///
    /// Database errors go through the kernel sqlx conversion so a unique
    /// violation caught by a constraint still maps to the field-keyed
    /// validation shape.
    pub fn to_app_error(self) -> AppError {
        match self {
            ReviewsError::Database(err) => AppError::from(err),
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
            ReviewsError::Database(e) => {
                tracing::error!(error = %e, "Reviews database error");
            }
            ReviewsError::Internal(msg) => {
                tracing::error!(message = %msg, "Reviews internal error");
            }
            ReviewsError::Forbidden => {
                tracing::warn!("Permission denied");
            }
            _ => {
                tracing::debug!(error = %self, "Reviews error");
            }
        }
    }
}

impl IntoResponse for ReviewsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ReviewsError {
    fn from(err: AppError) -> Self {
        ReviewsError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys() {
        assert_eq!(ReviewsError::DuplicateReview.field(), Some("title"));
        assert_eq!(ReviewsError::SlugTaken.field(), Some("slug"));
        assert_eq!(
            ReviewsError::InvalidScore(ScoreOutOfRange(0)).field(),
            Some("score")
        );
        assert_eq!(ReviewsError::TitleNotFound.field(), None);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ReviewsError::ReviewNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ReviewsError::DuplicateReview.kind(), ErrorKind::BadRequest);
        assert_eq!(ReviewsError::Forbidden.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_to_app_error_keeps_field() {
        let app = ReviewsError::DuplicateReview.to_app_error();
        assert_eq!(app.kind(), ErrorKind::BadRequest);
        assert_eq!(app.field(), Some("title"));
    }
}
