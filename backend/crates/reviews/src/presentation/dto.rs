//! Request / Response DTOs
//!
//! List endpoints all share the `{count, results}` envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{Category, Comment, Genre, Review, Title};
use crate::domain::repository::TitleFilter;
use kernel::pagination::Pagination;

/// Paginated list envelope
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub count: i64,
    pub results: Vec<T>,
}

// ============================================================================
// Categories / Genres
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ReferenceCreateRequest {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub name: String,
    pub slug: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            name: category.name,
            slug: category.slug.into_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenreResponse {
    pub name: String,
    pub slug: String,
}

impl From<Genre> for GenreResponse {
    fn from(genre: Genre) -> Self {
        Self {
            name: genre.name,
            slug: genre.slug.into_string(),
        }
    }
}

/// Query string for reference lists: optional substring search plus paging
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl SearchQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

fn default_limit() -> i64 {
    20
}

// ============================================================================
// Titles
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TitleCreateRequest {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TitlePatchRequest {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genre: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct TitleResponse {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub genre: Vec<GenreResponse>,
    pub category: Option<CategoryResponse>,
}

impl From<Title> for TitleResponse {
    fn from(title: Title) -> Self {
        Self {
            id: title.title_id.into_uuid(),
            name: title.name,
            year: title.year.value(),
            rating: title.rating,
            description: title.description,
            genre: title.genres.into_iter().map(GenreResponse::from).collect(),
            category: title.category.map(CategoryResponse::from),
        }
    }
}

/// Query string for title lists: slug / name / year filters plus paging
#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub category: Option<String>,
    pub genre: Option<String>,
    pub name: Option<String>,
    pub year: Option<i32>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl TitleQuery {
    pub fn filter(&self) -> TitleFilter {
        TitleFilter {
            category: self.category.clone(),
            genre: self.genre.clone(),
            name: self.name.clone(),
            year: self.year,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

// ============================================================================
// Reviews / Comments
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ReviewCreateRequest {
    pub text: String,
    pub score: i16,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewPatchRequest {
    pub text: Option<String>,
    pub score: Option<i16>,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub score: i16,
    pub pub_date: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.review_id.into_uuid(),
            text: review.text,
            author: review.author_username,
            score: review.score.value(),
            pub_date: review.pub_date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentCreateRequest {
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentPatchRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub pub_date: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.comment_id.into_uuid(),
            text: comment.text,
            author: comment.author_username,
            pub_date: comment.pub_date,
        }
    }
}
