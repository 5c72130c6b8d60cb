//! PostgreSQL Repository Implementations
//!
//! Ratings are never stored; title reads aggregate `AVG(score)` over the
//! reviews table in the same query.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, CommentId, GenreId, ReviewId, TitleId, UserId};
use kernel::pagination::Pagination;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{Category, Comment, Genre, Review, Title, TitleRecord};
use crate::domain::repository::{
    CategoryRepository, CommentRepository, GenreRepository, ReviewRepository, TitleFilter,
    TitleRepository,
};
use crate::domain::value_object::{Score, Slug, Year};
use crate::error::{ReviewsError, ReviewsResult};

/// PostgreSQL-backed reviews repository
#[derive(Clone)]
pub struct PgReviewsRepository {
    pool: PgPool,
}

impl PgReviewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for PgReviewsRepository {
    async fn create(&self, category: &Category) -> ReviewsResult<()> {
        sqlx::query("INSERT INTO categories (category_id, name, slug) VALUES ($1, $2, $3)")
            .bind(category.category_id.as_uuid())
            .bind(&category.name)
            .bind(category.slug.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> ReviewsResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT category_id, name, slug FROM categories WHERE slug = $1",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn list(&self, search: Option<&str>, page: &Pagination) -> ReviewsResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT category_id, name, slug
            FROM categories
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn count(&self, search: Option<&str>) -> ReviewsResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM categories
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(search)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn delete_by_slug(&self, slug: &Slug) -> ReviewsResult<bool> {
        // Titles are detached via ON DELETE SET NULL
        let deleted = sqlx::query("DELETE FROM categories WHERE slug = $1")
            .bind(slug.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Genre Repository Implementation
// ============================================================================

impl GenreRepository for PgReviewsRepository {
    async fn create(&self, genre: &Genre) -> ReviewsResult<()> {
        sqlx::query("INSERT INTO genres (genre_id, name, slug) VALUES ($1, $2, $3)")
            .bind(genre.genre_id.as_uuid())
            .bind(&genre.name)
            .bind(genre.slug.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> ReviewsResult<Option<Genre>> {
        let row = sqlx::query_as::<_, GenreRow>(
            "SELECT genre_id, name, slug FROM genres WHERE slug = $1",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GenreRow::into_genre))
    }

    async fn list(&self, search: Option<&str>, page: &Pagination) -> ReviewsResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, GenreRow>(
            r#"
            SELECT genre_id, name, slug
            FROM genres
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GenreRow::into_genre).collect())
    }

    async fn count(&self, search: Option<&str>) -> ReviewsResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM genres
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(search)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn delete_by_slug(&self, slug: &Slug) -> ReviewsResult<bool> {
        // Join rows are removed via ON DELETE CASCADE; titles stay
        let deleted = sqlx::query("DELETE FROM genres WHERE slug = $1")
            .bind(slug.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Title Repository Implementation
// ============================================================================

const TITLE_SELECT: &str = r#"
    SELECT
        t.title_id,
        t.name,
        t.year,
        t.description,
        c.category_id AS category_id,
        c.name AS category_name,
        c.slug AS category_slug,
        AVG(r.score)::float8 AS rating
    FROM titles t
    LEFT JOIN categories c ON c.category_id = t.category_id
    LEFT JOIN reviews r ON r.title_id = t.title_id
"#;

const TITLE_GROUP_BY: &str = " GROUP BY t.title_id, c.category_id, c.name, c.slug";

fn push_title_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &TitleFilter) {
    builder.push(" WHERE TRUE");
    if let Some(category) = &filter.category {
        builder.push(" AND c.slug = ");
        builder.push_bind(category.clone());
    }
    if let Some(genre) = &filter.genre {
        builder.push(
            " AND EXISTS (SELECT 1 FROM genre_titles gt \
             JOIN genres g ON g.genre_id = gt.genre_id \
             WHERE gt.title_id = t.title_id AND g.slug = ",
        );
        builder.push_bind(genre.clone());
        builder.push(")");
    }
    if let Some(name) = &filter.name {
        builder.push(" AND t.name ILIKE ");
        builder.push_bind(format!("%{name}%"));
    }
    if let Some(year) = filter.year {
        builder.push(" AND t.year = ");
        builder.push_bind(year);
    }
}

impl PgReviewsRepository {
    /// Fetch genre lists for a set of titles in one query
    async fn genres_for_titles(
        &self,
        title_ids: &[Uuid],
    ) -> ReviewsResult<HashMap<Uuid, Vec<Genre>>> {
        let rows = sqlx::query_as::<_, TitleGenreRow>(
            r#"
            SELECT gt.title_id, g.genre_id, g.name, g.slug
            FROM genre_titles gt
            JOIN genres g ON g.genre_id = gt.genre_id
            WHERE gt.title_id = ANY($1)
            ORDER BY g.name
            "#,
        )
        .bind(title_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Genre>> = HashMap::new();
        for row in rows {
            grouped.entry(row.title_id).or_default().push(Genre {
                genre_id: GenreId::from_uuid(row.genre_id),
                name: row.name,
                slug: Slug::from_db(row.slug),
            });
        }
        Ok(grouped)
    }

    async fn hydrate_titles(&self, rows: Vec<TitleRow>) -> ReviewsResult<Vec<Title>> {
        let title_ids: Vec<Uuid> = rows.iter().map(|r| r.title_id).collect();
        let mut grouped = self.genres_for_titles(&title_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let genres = grouped.remove(&row.title_id).unwrap_or_default();
                row.into_title(genres)
            })
            .collect())
    }
}

impl TitleRepository for PgReviewsRepository {
    async fn create(&self, record: &TitleRecord) -> ReviewsResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO titles (title_id, name, year, description, category_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.title_id.as_uuid())
        .bind(&record.name)
        .bind(record.year.value())
        .bind(&record.description)
        .bind(record.category_id.map(|id| id.into_uuid()))
        .execute(&mut *tx)
        .await?;

        let genre_uuids: Vec<Uuid> = record.genre_ids.iter().map(|id| id.into_uuid()).collect();
        sqlx::query(
            "INSERT INTO genre_titles (title_id, genre_id) SELECT $1, UNNEST($2::uuid[])",
        )
        .bind(record.title_id.as_uuid())
        .bind(&genre_uuids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, title_id: &TitleId) -> ReviewsResult<Option<Title>> {
        let row = sqlx::query_as::<_, TitleRow>(&format!(
            "{TITLE_SELECT} WHERE t.title_id = $1 {TITLE_GROUP_BY}"
        ))
        .bind(title_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut titles = self.hydrate_titles(vec![row]).await?;
        Ok(titles.pop())
    }

    async fn list(&self, filter: &TitleFilter, page: &Pagination) -> ReviewsResult<Vec<Title>> {
        let mut builder = QueryBuilder::new(TITLE_SELECT);
        push_title_filter(&mut builder, filter);
        builder.push(TITLE_GROUP_BY);
        builder.push(" ORDER BY t.year DESC, t.name LIMIT ");
        builder.push_bind(page.limit);
        builder.push(" OFFSET ");
        builder.push_bind(page.offset);

        let rows = builder
            .build_query_as::<TitleRow>()
            .fetch_all(&self.pool)
            .await?;

        self.hydrate_titles(rows).await
    }

    async fn count(&self, filter: &TitleFilter) -> ReviewsResult<i64> {
        let mut builder = QueryBuilder::new(
            "SELECT COUNT(*) FROM titles t \
             LEFT JOIN categories c ON c.category_id = t.category_id",
        );
        push_title_filter(&mut builder, filter);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn update(&self, record: &TitleRecord) -> ReviewsResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE titles SET
                name = $2,
                year = $3,
                description = $4,
                category_id = $5
            WHERE title_id = $1
            "#,
        )
        .bind(record.title_id.as_uuid())
        .bind(&record.name)
        .bind(record.year.value())
        .bind(&record.description)
        .bind(record.category_id.map(|id| id.into_uuid()))
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM genre_titles WHERE title_id = $1")
            .bind(record.title_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        let genre_uuids: Vec<Uuid> = record.genre_ids.iter().map(|id| id.into_uuid()).collect();
        sqlx::query(
            "INSERT INTO genre_titles (title_id, genre_id) SELECT $1, UNNEST($2::uuid[])",
        )
        .bind(record.title_id.as_uuid())
        .bind(&genre_uuids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, title_id: &TitleId) -> ReviewsResult<bool> {
        // Reviews and comments cascade in the schema
        let deleted = sqlx::query("DELETE FROM titles WHERE title_id = $1")
            .bind(title_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Review Repository Implementation
// ============================================================================

const REVIEW_SELECT: &str = r#"
    SELECT
        r.review_id,
        r.title_id,
        r.author_id,
        u.username AS author_username,
        r.text,
        r.score,
        r.pub_date
    FROM reviews r
    JOIN users u ON u.user_id = r.author_id
"#;

impl ReviewRepository for PgReviewsRepository {
    async fn create(&self, review: &Review) -> ReviewsResult<Review> {
        // The uq_reviews_author_title constraint backs the duplicate
        // pre-check under concurrent posts
        let author_username = sqlx::query_scalar::<_, String>(
            r#"
            WITH inserted AS (
                INSERT INTO reviews (review_id, title_id, author_id, text, score, pub_date)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING author_id
            )
            SELECT u.username FROM inserted i JOIN users u ON u.user_id = i.author_id
            "#,
        )
        .bind(review.review_id.as_uuid())
        .bind(review.title_id.as_uuid())
        .bind(review.author_id.as_uuid())
        .bind(&review.text)
        .bind(review.score.value())
        .bind(review.pub_date)
        .fetch_one(&self.pool)
        .await?;

        let mut hydrated = review.clone();
        hydrated.author_username = author_username;
        Ok(hydrated)
    }

    async fn find_by_id(
        &self,
        title_id: &TitleId,
        review_id: &ReviewId,
    ) -> ReviewsResult<Option<Review>> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "{REVIEW_SELECT} WHERE r.review_id = $1 AND r.title_id = $2"
        ))
        .bind(review_id.as_uuid())
        .bind(title_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ReviewRow::into_review))
    }

    async fn list_by_title(
        &self,
        title_id: &TitleId,
        page: &Pagination,
    ) -> ReviewsResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "{REVIEW_SELECT} WHERE r.title_id = $1 ORDER BY r.pub_date DESC LIMIT $2 OFFSET $3"
        ))
        .bind(title_id.as_uuid())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ReviewRow::into_review).collect())
    }

    async fn count_by_title(&self, title_id: &TitleId) -> ReviewsResult<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE title_id = $1")
            .bind(title_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn exists_by_author_and_title(
        &self,
        author_id: &UserId,
        title_id: &TitleId,
    ) -> ReviewsResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE author_id = $1 AND title_id = $2)",
        )
        .bind(author_id.as_uuid())
        .bind(title_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, review: &Review) -> ReviewsResult<()> {
        sqlx::query("UPDATE reviews SET text = $2, score = $3 WHERE review_id = $1")
            .bind(review.review_id.as_uuid())
            .bind(&review.text)
            .bind(review.score.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, review_id: &ReviewId) -> ReviewsResult<()> {
        // Comments cascade in the schema
        let deleted = sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(review_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(ReviewsError::ReviewNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

const COMMENT_SELECT: &str = r#"
    SELECT
        c.comment_id,
        c.review_id,
        c.author_id,
        u.username AS author_username,
        c.text,
        c.pub_date
    FROM comments c
    JOIN users u ON u.user_id = c.author_id
"#;

impl CommentRepository for PgReviewsRepository {
    async fn create(&self, comment: &Comment) -> ReviewsResult<Comment> {
        let author_username = sqlx::query_scalar::<_, String>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (comment_id, review_id, author_id, text, pub_date)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING author_id
            )
            SELECT u.username FROM inserted i JOIN users u ON u.user_id = i.author_id
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.review_id.as_uuid())
        .bind(comment.author_id.as_uuid())
        .bind(&comment.text)
        .bind(comment.pub_date)
        .fetch_one(&self.pool)
        .await?;

        let mut hydrated = comment.clone();
        hydrated.author_username = author_username;
        Ok(hydrated)
    }

    async fn find_by_id(
        &self,
        review_id: &ReviewId,
        comment_id: &CommentId,
    ) -> ReviewsResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "{COMMENT_SELECT} WHERE c.comment_id = $1 AND c.review_id = $2"
        ))
        .bind(comment_id.as_uuid())
        .bind(review_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn list_by_review(
        &self,
        review_id: &ReviewId,
        page: &Pagination,
    ) -> ReviewsResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "{COMMENT_SELECT} WHERE c.review_id = $1 ORDER BY c.pub_date DESC LIMIT $2 OFFSET $3"
        ))
        .bind(review_id.as_uuid())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn count_by_review(&self, review_id: &ReviewId) -> ReviewsResult<i64> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE review_id = $1")
                .bind(review_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }

    async fn update(&self, comment: &Comment) -> ReviewsResult<()> {
        sqlx::query("UPDATE comments SET text = $2 WHERE comment_id = $1")
            .bind(comment.comment_id.as_uuid())
            .bind(&comment.text)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, comment_id: &CommentId) -> ReviewsResult<()> {
        let deleted = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(ReviewsError::CommentNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: Uuid,
    name: String,
    slug: String,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            category_id: CategoryId::from_uuid(self.category_id),
            name: self.name,
            slug: Slug::from_db(self.slug),
        }
    }
}

#[derive(sqlx::FromRow)]
struct GenreRow {
    genre_id: Uuid,
    name: String,
    slug: String,
}

impl GenreRow {
    fn into_genre(self) -> Genre {
        Genre {
            genre_id: GenreId::from_uuid(self.genre_id),
            name: self.name,
            slug: Slug::from_db(self.slug),
        }
    }
}

#[derive(sqlx::FromRow)]
struct TitleGenreRow {
    title_id: Uuid,
    genre_id: Uuid,
    name: String,
    slug: String,
}

#[derive(sqlx::FromRow)]
struct TitleRow {
    title_id: Uuid,
    name: String,
    year: i32,
    description: Option<String>,
    category_id: Option<Uuid>,
    category_name: Option<String>,
    category_slug: Option<String>,
    rating: Option<f64>,
}

impl TitleRow {
    fn into_title(self, genres: Vec<Genre>) -> Title {
        let category = match (self.category_id, self.category_name, self.category_slug) {
            (Some(category_id), Some(name), Some(slug)) => Some(Category {
                category_id: CategoryId::from_uuid(category_id),
                name,
                slug: Slug::from_db(slug),
            }),
            _ => None,
        };

        Title {
            title_id: TitleId::from_uuid(self.title_id),
            name: self.name,
            year: Year::from_db(self.year),
            description: self.description,
            category,
            genres,
            rating: self.rating,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    review_id: Uuid,
    title_id: Uuid,
    author_id: Uuid,
    author_username: String,
    text: String,
    score: i16,
    pub_date: DateTime<Utc>,
}

impl ReviewRow {
    fn into_review(self) -> Review {
        Review {
            review_id: ReviewId::from_uuid(self.review_id),
            title_id: TitleId::from_uuid(self.title_id),
            author_id: UserId::from_uuid(self.author_id),
            author_username: self.author_username,
            text: self.text,
            score: Score::from_db(self.score),
            pub_date: self.pub_date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    review_id: Uuid,
    author_id: Uuid,
    author_username: String,
    text: String,
    pub_date: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.comment_id),
            review_id: ReviewId::from_uuid(self.review_id),
            author_id: UserId::from_uuid(self.author_id),
            author_username: self.author_username,
            text: self.text,
            pub_date: self.pub_date,
        }
    }
}
