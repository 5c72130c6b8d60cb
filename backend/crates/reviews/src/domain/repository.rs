//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{CommentId, ReviewId, TitleId, UserId};
use kernel::pagination::Pagination;

use crate::domain::entity::{Category, Comment, Genre, Review, Title, TitleRecord};
use crate::domain::value_object::Slug;
use crate::error::ReviewsResult;

/// Optional filters for the title listing
#[derive(Debug, Clone, Default)]
pub struct TitleFilter {
    /// Category slug, exact match
    pub category: Option<String>,
    /// Genre slug, exact match
    pub genre: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Release year, exact match
    pub year: Option<i32>,
}

/// Category repository trait
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    /// Create a new category
    async fn create(&self, category: &Category) -> ReviewsResult<()>;

    /// Find category by slug
    async fn find_by_slug(&self, slug: &Slug) -> ReviewsResult<Option<Category>>;

    /// List categories ordered by name, optionally filtered by a
    /// case-insensitive name substring
    async fn list(&self, search: Option<&str>, page: &Pagination) -> ReviewsResult<Vec<Category>>;

    /// Count categories matching the same filter
    async fn count(&self, search: Option<&str>) -> ReviewsResult<i64>;

    /// Delete by slug; detaches titles rather than deleting them
    async fn delete_by_slug(&self, slug: &Slug) -> ReviewsResult<bool>;
}

/// Genre repository trait
#[trait_variant::make(GenreRepository: Send)]
pub trait LocalGenreRepository {
    /// Create a new genre
    async fn create(&self, genre: &Genre) -> ReviewsResult<()>;

    /// Find genre by slug
    async fn find_by_slug(&self, slug: &Slug) -> ReviewsResult<Option<Genre>>;

    /// List genres ordered by name, optionally filtered by a
    /// case-insensitive name substring
    async fn list(&self, search: Option<&str>, page: &Pagination) -> ReviewsResult<Vec<Genre>>;

    /// Count genres matching the same filter
    async fn count(&self, search: Option<&str>) -> ReviewsResult<i64>;

    /// Delete by slug; attached titles lose the genre, nothing else
    async fn delete_by_slug(&self, slug: &Slug) -> ReviewsResult<bool>;
}

/// Title repository trait
#[trait_variant::make(TitleRepository: Send)]
pub trait LocalTitleRepository {
    /// Create a title with its genre links
    async fn create(&self, record: &TitleRecord) -> ReviewsResult<()>;

    /// Find a title hydrated with category, genres and rating
    async fn find_by_id(&self, title_id: &TitleId) -> ReviewsResult<Option<Title>>;

    /// List titles ordered by year descending then name, applying the filter
    async fn list(&self, filter: &TitleFilter, page: &Pagination) -> ReviewsResult<Vec<Title>>;

    /// Count titles matching the same filter
    async fn count(&self, filter: &TitleFilter) -> ReviewsResult<i64>;

    /// Replace the title's stored fields and genre links
    async fn update(&self, record: &TitleRecord) -> ReviewsResult<()>;

    /// Delete a title; its reviews and their comments go with it
    async fn delete(&self, title_id: &TitleId) -> ReviewsResult<bool>;
}

/// Review repository trait
#[trait_variant::make(ReviewRepository: Send)]
pub trait LocalReviewRepository {
    /// Create a review; returns it hydrated with the author's username
    async fn create(&self, review: &Review) -> ReviewsResult<Review>;

    /// Find a review under the given title
    async fn find_by_id(
        &self,
        title_id: &TitleId,
        review_id: &ReviewId,
    ) -> ReviewsResult<Option<Review>>;

    /// List a title's reviews, newest first
    async fn list_by_title(
        &self,
        title_id: &TitleId,
        page: &Pagination,
    ) -> ReviewsResult<Vec<Review>>;

    /// Count a title's reviews
    async fn count_by_title(&self, title_id: &TitleId) -> ReviewsResult<i64>;

    /// Whether the author has already reviewed the title
    async fn exists_by_author_and_title(
        &self,
        author_id: &UserId,
        title_id: &TitleId,
    ) -> ReviewsResult<bool>;

    /// Update text and score
    async fn update(&self, review: &Review) -> ReviewsResult<()>;

    /// Delete a review; its comments go with it
    async fn delete(&self, review_id: &ReviewId) -> ReviewsResult<()>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Create a comment; returns it hydrated with the author's username
    async fn create(&self, comment: &Comment) -> ReviewsResult<Comment>;

    /// Find a comment under the given review
    async fn find_by_id(
        &self,
        review_id: &ReviewId,
        comment_id: &CommentId,
    ) -> ReviewsResult<Option<Comment>>;

    /// List a review's comments, newest first
    async fn list_by_review(
        &self,
        review_id: &ReviewId,
        page: &Pagination,
    ) -> ReviewsResult<Vec<Comment>>;

    /// Count a review's comments
    async fn count_by_review(&self, review_id: &ReviewId) -> ReviewsResult<i64>;

    /// Update text
    async fn update(&self, comment: &Comment) -> ReviewsResult<()>;

    /// Delete a comment
    async fn delete(&self, comment_id: &CommentId) -> ReviewsResult<()>;
}
