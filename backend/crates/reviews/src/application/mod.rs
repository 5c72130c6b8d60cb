//! Application Layer

pub mod catalog;
pub mod comments;
pub mod reviews;
pub mod titles;

pub use catalog::{CategoriesUseCase, GenresUseCase};
pub use comments::{CommentInput, CommentPatch, CommentsUseCase};
pub use reviews::{ReviewInput, ReviewPatch, ReviewsUseCase};
pub use titles::{TitleInput, TitlePatch, TitlesUseCase};

use crate::error::{ReviewsError, ReviewsResult};

/// Maximum display-name length for categories, genres and titles
pub const NAME_MAX_LENGTH: usize = 256;

/// Validate a display name for storage
pub(crate) fn validate_name(name: String) -> ReviewsResult<String> {
    if name.is_empty() {
        return Err(ReviewsError::Validation {
            field: "name",
            message: "Name cannot be empty".to_string(),
        });
    }
    let length = name.chars().count();
    if length > NAME_MAX_LENGTH {
        return Err(ReviewsError::Validation {
            field: "name",
            message: format!("Name is too long ({length} chars, maximum {NAME_MAX_LENGTH})"),
        });
    }
    Ok(name)
}

/// Validate free text for reviews and comments
pub(crate) fn validate_text(text: String) -> ReviewsResult<String> {
    if text.is_empty() {
        return Err(ReviewsError::Validation {
            field: "text",
            message: "Text cannot be empty".to_string(),
        });
    }
    Ok(text)
}
