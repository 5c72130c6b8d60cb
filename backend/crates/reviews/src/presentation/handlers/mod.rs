//! HTTP Handlers

pub mod catalog;
pub mod content;

use std::sync::Arc;

use crate::domain::repository::{
    CategoryRepository, CommentRepository, GenreRepository, ReviewRepository, TitleRepository,
};

/// Shared state for catalog and content handlers
///
/// A single store implements every repository trait; use cases borrow
/// it per concern.
pub struct ReviewsAppState<S>
where
    S: CategoryRepository
        + GenreRepository
        + TitleRepository
        + ReviewRepository
        + CommentRepository
        + Send
        + Sync
        + 'static,
{
    pub store: Arc<S>,
}

impl<S> Clone for ReviewsAppState<S>
where
    S: CategoryRepository
        + GenreRepository
        + TitleRepository
        + ReviewRepository
        + CommentRepository
        + Send
        + Sync
        + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
