//! Catalog Routers

use axum::{
    Router,
    routing::{delete, get},
};
use std::sync::Arc;

use crate::domain::repository::{
    CategoryRepository, CommentRepository, GenreRepository, ReviewRepository, TitleRepository,
};
use crate::presentation::handlers::{ReviewsAppState, catalog, content};

/// Routes for category administration
pub fn categories_router<S>(store: Arc<S>) -> Router
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
    Router::new()
        .route(
            "/",
            get(catalog::list_categories::<S>).post(catalog::create_category::<S>),
        )
        .route("/{slug}", delete(catalog::delete_category::<S>))
        .with_state(ReviewsAppState { store })
}

/// Routes for genre administration
pub fn genres_router<S>(store: Arc<S>) -> Router
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
    Router::new()
        .route(
            "/",
            get(catalog::list_genres::<S>).post(catalog::create_genre::<S>),
        )
        .route("/{slug}", delete(catalog::delete_genre::<S>))
        .with_state(ReviewsAppState { store })
}

/// Routes for titles with nested reviews and comments
pub fn titles_router<S>(store: Arc<S>) -> Router
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
    Router::new()
        .route(
            "/",
            get(catalog::list_titles::<S>).post(catalog::create_title::<S>),
        )
        .route(
            "/{title_id}",
            get(catalog::get_title::<S>)
                .patch(catalog::patch_title::<S>)
                .delete(catalog::delete_title::<S>),
        )
        .route(
            "/{title_id}/reviews",
            get(content::list_reviews::<S>).post(content::create_review::<S>),
        )
        .route(
            "/{title_id}/reviews/{review_id}",
            get(content::get_review::<S>)
                .patch(content::patch_review::<S>)
                .delete(content::delete_review::<S>),
        )
        .route(
            "/{title_id}/reviews/{review_id}/comments",
            get(content::list_comments::<S>).post(content::create_comment::<S>),
        )
        .route(
            "/{title_id}/reviews/{review_id}/comments/{comment_id}",
            get(content::get_comment::<S>)
                .patch(content::patch_comment::<S>)
                .delete(content::delete_comment::<S>),
        )
        .with_state(ReviewsAppState { store })
}
