//! Reviews (Catalog & Content) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Category and genre reference data keyed by slug
//! - Titles with category, genre set and a live average rating
//! - One review per user per title, scored 1 to 10
//! - Comments threaded under reviews
//!
//! ## Data Model
//! - Ratings are never stored; every title read aggregates the current
//!   review scores
//! - The one-review-per-title rule is enforced by a database constraint;
//!   the application pre-check exists only to produce a friendly error
//! - Deleting a title removes its reviews and their comments; deleting
//!   a category detaches its titles

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{ReviewsError, ReviewsResult};
pub use infra::postgres::PgReviewsRepository;
pub use presentation::router::{categories_router, genres_router, titles_router};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
