//! In-Memory Catalog and Content Store
//!
//! One map-backed store implementing every reviews repository trait,
//! used by use-case tests and local development without a database.
//! Cascade and detach rules mirror the Postgres schema.

use std::collections::HashMap;
use std::sync::RwLock;

use kernel::id::{CommentId, ReviewId, TitleId, UserId};
use kernel::pagination::Pagination;
use uuid::Uuid;

use crate::domain::entity::{Category, Comment, Genre, Review, Title, TitleRecord};
use crate::domain::rating::mean_score;
use crate::domain::repository::{
    CategoryRepository, CommentRepository, GenreRepository, ReviewRepository, TitleFilter,
    TitleRepository,
};
use crate::domain::value_object::Slug;
use crate::error::{ReviewsError, ReviewsResult};

#[derive(Default)]
struct Inner {
    authors: HashMap<Uuid, String>,
    categories: Vec<Category>,
    genres: Vec<Genre>,
    titles: Vec<TitleRecord>,
    reviews: Vec<Review>,
    comments: Vec<Comment>,
}

#[derive(Default)]
pub struct InMemoryReviewsRepository {
    inner: RwLock<Inner>,
}

impl InMemoryReviewsRepository {
    /// Make a username resolvable for review and comment hydration
    pub fn register_author(&self, user_id: &UserId, username: &str) {
        if let Ok(mut inner) = self.inner.write() {
            inner
                .authors
                .insert(user_id.into_uuid(), username.to_string());
        }
    }

    fn read(&self) -> ReviewsResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| ReviewsError::Internal("Store lock poisoned".to_string()))
    }

    fn write(&self) -> ReviewsResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| ReviewsError::Internal("Store lock poisoned".to_string()))
    }
}

impl Inner {
    fn hydrate_title(&self, record: &TitleRecord) -> Title {
        let category = record
            .category_id
            .and_then(|id| self.categories.iter().find(|c| c.category_id == id))
            .cloned();
        let genres = record
            .genre_ids
            .iter()
            .filter_map(|id| self.genres.iter().find(|g| g.genre_id == *id))
            .cloned()
            .collect();
        let scores: Vec<i16> = self
            .reviews
            .iter()
            .filter(|r| r.title_id == record.title_id)
            .map(|r| r.score.value())
            .collect();

        Title {
            title_id: record.title_id,
            name: record.name.clone(),
            year: record.year,
            description: record.description.clone(),
            category,
            genres,
            rating: mean_score(&scores),
        }
    }

    fn author_name(&self, author_id: &UserId) -> ReviewsResult<String> {
        self.authors
            .get(author_id.as_uuid())
            .cloned()
            .ok_or_else(|| ReviewsError::Internal("Unknown author".to_string()))
    }
}

fn matches_search(name: &str, search: Option<&str>) -> bool {
    match search {
        Some(needle) => name.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

fn paginate<T: Clone>(items: Vec<T>, page: &Pagination) -> Vec<T> {
    let page = page.clamped();
    items
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for InMemoryReviewsRepository {
    async fn create(&self, category: &Category) -> ReviewsResult<()> {
        let mut inner = self.write()?;
        if inner.categories.iter().any(|c| c.slug == category.slug) {
            return Err(ReviewsError::SlugTaken);
        }
        inner.categories.push(category.clone());
        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> ReviewsResult<Option<Category>> {
        Ok(self
            .read()?
            .categories
            .iter()
            .find(|c| &c.slug == slug)
            .cloned())
    }

    async fn list(&self, search: Option<&str>, page: &Pagination) -> ReviewsResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .read()?
            .categories
            .iter()
            .filter(|c| matches_search(&c.name, search))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(categories, page))
    }

    async fn count(&self, search: Option<&str>) -> ReviewsResult<i64> {
        Ok(self
            .read()?
            .categories
            .iter()
            .filter(|c| matches_search(&c.name, search))
            .count() as i64)
    }

    async fn delete_by_slug(&self, slug: &Slug) -> ReviewsResult<bool> {
        let mut inner = self.write()?;
        let Some(position) = inner.categories.iter().position(|c| &c.slug == slug) else {
            return Ok(false);
        };
        let removed = inner.categories.remove(position);
        // Titles keep existing without a category
        for title in &mut inner.titles {
            if title.category_id == Some(removed.category_id) {
                title.category_id = None;
            }
        }
        Ok(true)
    }
}

// ============================================================================
// Genre Repository Implementation
// ============================================================================

impl GenreRepository for InMemoryReviewsRepository {
    async fn create(&self, genre: &Genre) -> ReviewsResult<()> {
        let mut inner = self.write()?;
        if inner.genres.iter().any(|g| g.slug == genre.slug) {
            return Err(ReviewsError::SlugTaken);
        }
        inner.genres.push(genre.clone());
        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> ReviewsResult<Option<Genre>> {
        Ok(self
            .read()?
            .genres
            .iter()
            .find(|g| &g.slug == slug)
            .cloned())
    }

    async fn list(&self, search: Option<&str>, page: &Pagination) -> ReviewsResult<Vec<Genre>> {
        let mut genres: Vec<Genre> = self
            .read()?
            .genres
            .iter()
            .filter(|g| matches_search(&g.name, search))
            .cloned()
            .collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(genres, page))
    }

    async fn count(&self, search: Option<&str>) -> ReviewsResult<i64> {
        Ok(self
            .read()?
            .genres
            .iter()
            .filter(|g| matches_search(&g.name, search))
            .count() as i64)
    }

    async fn delete_by_slug(&self, slug: &Slug) -> ReviewsResult<bool> {
        let mut inner = self.write()?;
        let Some(position) = inner.genres.iter().position(|g| &g.slug == slug) else {
            return Ok(false);
        };
        let removed = inner.genres.remove(position);
        // Titles keep existing without the genre
        for title in &mut inner.titles {
            title.genre_ids.retain(|id| *id != removed.genre_id);
        }
        Ok(true)
    }
}

// ============================================================================
// Title Repository Implementation
// ============================================================================

impl InMemoryReviewsRepository {
    fn title_matches(&self, inner: &Inner, record: &TitleRecord, filter: &TitleFilter) -> bool {
        if let Some(category_slug) = &filter.category {
            let matched = record
                .category_id
                .and_then(|id| inner.categories.iter().find(|c| c.category_id == id))
                .is_some_and(|c| c.slug.as_str() == category_slug);
            if !matched {
                return false;
            }
        }
        if let Some(genre_slug) = &filter.genre {
            let matched = record.genre_ids.iter().any(|id| {
                inner
                    .genres
                    .iter()
                    .any(|g| g.genre_id == *id && g.slug.as_str() == genre_slug)
            });
            if !matched {
                return false;
            }
        }
        if let Some(name) = &filter.name {
            if !matches_search(&record.name, Some(name)) {
                return false;
            }
        }
        if let Some(year) = filter.year {
            if record.year.value() != year {
                return false;
            }
        }
        true
    }
}

impl TitleRepository for InMemoryReviewsRepository {
    async fn create(&self, record: &TitleRecord) -> ReviewsResult<()> {
        self.write()?.titles.push(record.clone());
        Ok(())
    }

    async fn find_by_id(&self, title_id: &TitleId) -> ReviewsResult<Option<Title>> {
        let inner = self.read()?;
        Ok(inner
            .titles
            .iter()
            .find(|t| t.title_id == *title_id)
            .map(|record| inner.hydrate_title(record)))
    }

    async fn list(&self, filter: &TitleFilter, page: &Pagination) -> ReviewsResult<Vec<Title>> {
        let inner = self.read()?;
        let mut titles: Vec<Title> = inner
            .titles
            .iter()
            .filter(|record| self.title_matches(&inner, record, filter))
            .map(|record| inner.hydrate_title(record))
            .collect();
        titles.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| a.name.cmp(&b.name)));
        Ok(paginate(titles, page))
    }

    async fn count(&self, filter: &TitleFilter) -> ReviewsResult<i64> {
        let inner = self.read()?;
        Ok(inner
            .titles
            .iter()
            .filter(|record| self.title_matches(&inner, record, filter))
            .count() as i64)
    }

    async fn update(&self, record: &TitleRecord) -> ReviewsResult<()> {
        let mut inner = self.write()?;
        let Some(stored) = inner
            .titles
            .iter_mut()
            .find(|t| t.title_id == record.title_id)
        else {
            return Err(ReviewsError::TitleNotFound);
        };
        *stored = record.clone();
        Ok(())
    }

    async fn delete(&self, title_id: &TitleId) -> ReviewsResult<bool> {
        let mut inner = self.write()?;
        let before = inner.titles.len();
        inner.titles.retain(|t| t.title_id != *title_id);
        if inner.titles.len() == before {
            return Ok(false);
        }
        // Reviews and their comments cascade
        let orphaned: Vec<ReviewId> = inner
            .reviews
            .iter()
            .filter(|r| r.title_id == *title_id)
            .map(|r| r.review_id)
            .collect();
        inner.reviews.retain(|r| r.title_id != *title_id);
        inner
            .comments
            .retain(|c| !orphaned.contains(&c.review_id));
        Ok(true)
    }
}

// ============================================================================
// Review Repository Implementation
// ============================================================================

impl ReviewRepository for InMemoryReviewsRepository {
    async fn create(&self, review: &Review) -> ReviewsResult<Review> {
        let mut inner = self.write()?;
        if inner
            .reviews
            .iter()
            .any(|r| r.author_id == review.author_id && r.title_id == review.title_id)
        {
            return Err(ReviewsError::DuplicateReview);
        }
        let mut hydrated = review.clone();
        hydrated.author_username = inner.author_name(&review.author_id)?;
        inner.reviews.push(hydrated.clone());
        Ok(hydrated)
    }

    async fn find_by_id(
        &self,
        title_id: &TitleId,
        review_id: &ReviewId,
    ) -> ReviewsResult<Option<Review>> {
        Ok(self
            .read()?
            .reviews
            .iter()
            .find(|r| r.review_id == *review_id && r.title_id == *title_id)
            .cloned())
    }

    async fn list_by_title(
        &self,
        title_id: &TitleId,
        page: &Pagination,
    ) -> ReviewsResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .read()?
            .reviews
            .iter()
            .filter(|r| r.title_id == *title_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        Ok(paginate(reviews, page))
    }

    async fn count_by_title(&self, title_id: &TitleId) -> ReviewsResult<i64> {
        Ok(self
            .read()?
            .reviews
            .iter()
            .filter(|r| r.title_id == *title_id)
            .count() as i64)
    }

    async fn exists_by_author_and_title(
        &self,
        author_id: &UserId,
        title_id: &TitleId,
    ) -> ReviewsResult<bool> {
        Ok(self
            .read()?
            .reviews
            .iter()
            .any(|r| r.author_id == *author_id && r.title_id == *title_id))
    }

    async fn update(&self, review: &Review) -> ReviewsResult<()> {
        let mut inner = self.write()?;
        let Some(stored) = inner
            .reviews
            .iter_mut()
            .find(|r| r.review_id == review.review_id)
        else {
            return Err(ReviewsError::ReviewNotFound);
        };
        *stored = review.clone();
        Ok(())
    }

    async fn delete(&self, review_id: &ReviewId) -> ReviewsResult<()> {
        let mut inner = self.write()?;
        let before = inner.reviews.len();
        inner.reviews.retain(|r| r.review_id != *review_id);
        if inner.reviews.len() == before {
            return Err(ReviewsError::ReviewNotFound);
        }
        // Comments cascade
        inner.comments.retain(|c| c.review_id != *review_id);
        Ok(())
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for InMemoryReviewsRepository {
    async fn create(&self, comment: &Comment) -> ReviewsResult<Comment> {
        let mut inner = self.write()?;
        let mut hydrated = comment.clone();
        hydrated.author_username = inner.author_name(&comment.author_id)?;
        inner.comments.push(hydrated.clone());
        Ok(hydrated)
    }

    async fn find_by_id(
        &self,
        review_id: &ReviewId,
        comment_id: &CommentId,
    ) -> ReviewsResult<Option<Comment>> {
        Ok(self
            .read()?
            .comments
            .iter()
            .find(|c| c.comment_id == *comment_id && c.review_id == *review_id)
            .cloned())
    }

    async fn list_by_review(
        &self,
        review_id: &ReviewId,
        page: &Pagination,
    ) -> ReviewsResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .read()?
            .comments
            .iter()
            .filter(|c| c.review_id == *review_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        Ok(paginate(comments, page))
    }

    async fn count_by_review(&self, review_id: &ReviewId) -> ReviewsResult<i64> {
        Ok(self
            .read()?
            .comments
            .iter()
            .filter(|c| c.review_id == *review_id)
            .count() as i64)
    }

    async fn update(&self, comment: &Comment) -> ReviewsResult<()> {
        let mut inner = self.write()?;
        let Some(stored) = inner
            .comments
            .iter_mut()
            .find(|c| c.comment_id == comment.comment_id)
        else {
            return Err(ReviewsError::CommentNotFound);
        };
        *stored = comment.clone();
        Ok(())
    }

    async fn delete(&self, comment_id: &CommentId) -> ReviewsResult<()> {
        let mut inner = self.write()?;
        let before = inner.comments.len();
        inner.comments.retain(|c| c.comment_id != *comment_id);
        if inner.comments.len() == before {
            return Err(ReviewsError::CommentNotFound);
        }
        Ok(())
    }
}
