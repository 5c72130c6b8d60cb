//! Category and Genre Use Cases
//!
//! Reference data: open reads, admin-only writes. Neither resource has
//! a retrieve or update operation; they are created, listed and deleted.

use std::sync::Arc;

use auth::domain::policy::{Action, Principal, allow_reference};
use kernel::pagination::Pagination;

use crate::application::validate_name;
use crate::domain::entity::{Category, Genre};
use crate::domain::repository::{CategoryRepository, GenreRepository};
use crate::domain::value_object::Slug;
use crate::error::{ReviewsError, ReviewsResult};

/// Category use case
pub struct CategoriesUseCase<R>
where
    R: CategoryRepository,
{
    repo: Arc<R>,
}

impl<R> CategoriesUseCase<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        page: Pagination,
    ) -> ReviewsResult<(Vec<Category>, i64)> {
        let page = page.clamped();
        let categories = self.repo.list(search, &page).await?;
        let total = self.repo.count(search).await?;
        Ok((categories, total))
    }

    pub async fn create(
        &self,
        principal: &Principal,
        name: String,
        slug: String,
    ) -> ReviewsResult<Category> {
        if !allow_reference(principal, Action::Write).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }

        let name = validate_name(name)?;
        let slug = Slug::new(slug)?;
        if self.repo.find_by_slug(&slug).await?.is_some() {
            return Err(ReviewsError::SlugTaken);
        }

        let category = Category::new(name, slug);
        self.repo.create(&category).await?;
        tracing::info!(slug = %category.slug, "Category created");
        Ok(category)
    }

    pub async fn delete(&self, principal: &Principal, slug: &str) -> ReviewsResult<()> {
        if !allow_reference(principal, Action::Write).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }

        // A path segment that is not even a valid slug cannot name a row
        let slug = Slug::new(slug).map_err(|_| ReviewsError::CategoryNotFound)?;
        if !self.repo.delete_by_slug(&slug).await? {
            return Err(ReviewsError::CategoryNotFound);
        }
        tracing::info!(slug = %slug, "Category deleted");
        Ok(())
    }
}

/// Genre use case
pub struct GenresUseCase<R>
where
    R: GenreRepository,
{
    repo: Arc<R>,
}

impl<R> GenresUseCase<R>
where
    R: GenreRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        page: Pagination,
    ) -> ReviewsResult<(Vec<Genre>, i64)> {
        let page = page.clamped();
        let genres = self.repo.list(search, &page).await?;
        let total = self.repo.count(search).await?;
        Ok((genres, total))
    }

    pub async fn create(
        &self,
        principal: &Principal,
        name: String,
        slug: String,
    ) -> ReviewsResult<Genre> {
        if !allow_reference(principal, Action::Write).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }

        let name = validate_name(name)?;
        let slug = Slug::new(slug)?;
        if self.repo.find_by_slug(&slug).await?.is_some() {
            return Err(ReviewsError::SlugTaken);
        }

        let genre = Genre::new(name, slug);
        self.repo.create(&genre).await?;
        tracing::info!(slug = %genre.slug, "Genre created");
        Ok(genre)
    }

    pub async fn delete(&self, principal: &Principal, slug: &str) -> ReviewsResult<()> {
        if !allow_reference(principal, Action::Write).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }

        let slug = Slug::new(slug).map_err(|_| ReviewsError::GenreNotFound)?;
        if !self.repo.delete_by_slug(&slug).await? {
            return Err(ReviewsError::GenreNotFound);
        }
        tracing::info!(slug = %slug, "Genre deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryReviewsRepository;
    use auth::domain::value_object::UserRole;
    use kernel::id::UserId;

    fn admin() -> Principal {
        Principal::Known {
            user_id: UserId::new(),
            role: UserRole::Admin,
            is_staff: false,
        }
    }

    fn uc() -> CategoriesUseCase<InMemoryReviewsRepository> {
        CategoriesUseCase::new(Arc::new(InMemoryReviewsRepository::default()))
    }

    #[tokio::test]
    async fn test_anonymous_cannot_create() {
        let err = uc()
            .create(
                &Principal::Anonymous,
                "Films".to_string(),
                "films".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewsError::Forbidden));
    }

    #[tokio::test]
    async fn test_create_list_delete() {
        let uc = uc();
        uc.create(&admin(), "Films".to_string(), "films".to_string())
            .await
            .unwrap();
        uc.create(&admin(), "Books".to_string(), "books".to_string())
            .await
            .unwrap();

        let (categories, total) = uc.list(None, Pagination::default()).await.unwrap();
        assert_eq!(total, 2);
        // Ordered by name
        assert_eq!(categories[0].name, "Books");

        uc.delete(&admin(), "books").await.unwrap();
        let (_, total) = uc.list(None, Pagination::default()).await.unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let uc = uc();
        uc.create(&admin(), "Films".to_string(), "films".to_string())
            .await
            .unwrap();
        let err = uc
            .create(&admin(), "Movies".to_string(), "films".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewsError::SlugTaken));
    }

    #[tokio::test]
    async fn test_invalid_slug_rejected() {
        let err = uc()
            .create(&admin(), "Films".to_string(), "no way".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewsError::InvalidSlug(_)));
    }

    #[tokio::test]
    async fn test_delete_unknown_slug_is_not_found() {
        let err = uc().delete(&admin(), "ghost").await.unwrap_err();
        assert!(matches!(err, ReviewsError::CategoryNotFound));
    }

    #[tokio::test]
    async fn test_search_filters_by_name() {
        let uc = uc();
        uc.create(&admin(), "Films".to_string(), "films".to_string())
            .await
            .unwrap();
        uc.create(&admin(), "Books".to_string(), "books".to_string())
            .await
            .unwrap();

        let (found, total) = uc.list(Some("film"), Pagination::default()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(found[0].slug.as_str(), "films");
    }
}
