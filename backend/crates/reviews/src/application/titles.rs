//! Title Use Cases
//!
//! Titles reference their category and genres by slug on the way in and
//! are read back hydrated, rating included.

use std::sync::Arc;

use auth::domain::policy::{Action, Principal, allow_reference};
use kernel::id::{CategoryId, GenreId, TitleId};
use kernel::pagination::Pagination;

use crate::application::validate_name;
use crate::domain::entity::{Title, TitleRecord};
use crate::domain::repository::{
    CategoryRepository, GenreRepository, TitleFilter, TitleRepository,
};
use crate::domain::value_object::{Slug, Year};
use crate::error::{ReviewsError, ReviewsResult};

/// Fields accepted when creating a title
pub struct TitleInput {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genre: Vec<String>,
}

/// Fields accepted when patching a title; absent fields stay untouched
#[derive(Default)]
pub struct TitlePatch {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genre: Option<Vec<String>>,
}

/// Title use case
pub struct TitlesUseCase<T, C, G>
where
    T: TitleRepository,
    C: CategoryRepository,
    G: GenreRepository,
{
    titles: Arc<T>,
    categories: Arc<C>,
    genres: Arc<G>,
}

impl<T, C, G> TitlesUseCase<T, C, G>
where
    T: TitleRepository,
    C: CategoryRepository,
    G: GenreRepository,
{
    pub fn new(titles: Arc<T>, categories: Arc<C>, genres: Arc<G>) -> Self {
        Self {
            titles,
            categories,
            genres,
        }
    }

    pub async fn list(
        &self,
        filter: TitleFilter,
        page: Pagination,
    ) -> ReviewsResult<(Vec<Title>, i64)> {
        let page = page.clamped();
        let titles = self.titles.list(&filter, &page).await?;
        let total = self.titles.count(&filter).await?;
        Ok((titles, total))
    }

    pub async fn get(&self, title_id: &TitleId) -> ReviewsResult<Title> {
        self.titles
            .find_by_id(title_id)
            .await?
            .ok_or(ReviewsError::TitleNotFound)
    }

    pub async fn create(&self, principal: &Principal, input: TitleInput) -> ReviewsResult<Title> {
        if !allow_reference(principal, Action::Write).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }

        let record = TitleRecord {
            title_id: TitleId::new(),
            name: validate_name(input.name)?,
            year: Year::new(input.year)?,
            description: input.description,
            category_id: self.resolve_category(input.category).await?,
            genre_ids: self.resolve_genres(input.genre).await?,
        };

        self.titles.create(&record).await?;
        tracing::info!(title_id = %record.title_id, "Title created");
        self.get(&record.title_id).await
    }

    pub async fn update(
        &self,
        principal: &Principal,
        title_id: &TitleId,
        patch: TitlePatch,
    ) -> ReviewsResult<Title> {
        if !allow_reference(principal, Action::Write).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }

        let current = self.get(title_id).await?;

        let record = TitleRecord {
            title_id: *title_id,
            name: match patch.name {
                Some(name) => validate_name(name)?,
                None => current.name,
            },
            year: match patch.year {
                Some(year) => Year::new(year)?,
                None => current.year,
            },
            description: patch.description.or(current.description),
            category_id: match patch.category {
                Some(slug) => self.resolve_category(Some(slug)).await?,
                None => current.category.map(|c| c.category_id),
            },
            genre_ids: match patch.genre {
                Some(slugs) => self.resolve_genres(slugs).await?,
                None => current.genres.iter().map(|g| g.genre_id).collect(),
            },
        };

        self.titles.update(&record).await?;
        self.get(title_id).await
    }

    pub async fn delete(&self, principal: &Principal, title_id: &TitleId) -> ReviewsResult<()> {
        if !allow_reference(principal, Action::Write).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }
        if !self.titles.delete(title_id).await? {
            return Err(ReviewsError::TitleNotFound);
        }
        tracing::info!(title_id = %title_id, "Title deleted");
        Ok(())
    }

    async fn resolve_category(&self, slug: Option<String>) -> ReviewsResult<Option<CategoryId>> {
        let Some(slug) = slug else {
            return Ok(None);
        };
        let slug = Slug::new(slug).map_err(|_| ReviewsError::Validation {
            field: "category",
            message: "Unknown category slug".to_string(),
        })?;
        let category = self
            .categories
            .find_by_slug(&slug)
            .await?
            .ok_or(ReviewsError::Validation {
                field: "category",
                message: "Unknown category slug".to_string(),
            })?;
        Ok(Some(category.category_id))
    }

    async fn resolve_genres(&self, slugs: Vec<String>) -> ReviewsResult<Vec<GenreId>> {
        let mut genre_ids = Vec::with_capacity(slugs.len());
        for slug in slugs {
            let slug = Slug::new(slug).map_err(|_| ReviewsError::Validation {
                field: "genre",
                message: "Unknown genre slug".to_string(),
            })?;
            let genre = self
                .genres
                .find_by_slug(&slug)
                .await?
                .ok_or(ReviewsError::Validation {
                    field: "genre",
                    message: "Unknown genre slug".to_string(),
                })?;
            genre_ids.push(genre.genre_id);
        }
        Ok(genre_ids)
    }
}
