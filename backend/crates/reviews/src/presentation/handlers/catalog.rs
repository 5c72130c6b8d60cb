//! Category, Genre and Title Handlers

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use auth::domain::policy::Principal;
use kernel::id::TitleId;

use crate::application::{CategoriesUseCase, GenresUseCase, TitleInput, TitlePatch, TitlesUseCase};
use crate::domain::repository::{
    CategoryRepository, CommentRepository, GenreRepository, ReviewRepository, TitleRepository,
};
use crate::error::ReviewsResult;
use crate::presentation::dto::{
    CategoryResponse, GenreResponse, ListResponse, ReferenceCreateRequest, SearchQuery,
    TitleCreateRequest, TitlePatchRequest, TitleQuery, TitleResponse,
};
use crate::presentation::handlers::ReviewsAppState;

// ============================================================================
// Categories
// ============================================================================

/// GET /categories
pub async fn list_categories<S>(
    State(state): State<ReviewsAppState<S>>,
    Query(query): Query<SearchQuery>,
) -> ReviewsResult<Json<ListResponse<CategoryResponse>>>
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
    let use_case = CategoriesUseCase::new(state.store.clone());
    let (categories, count) = use_case
        .list(query.search.as_deref(), query.pagination())
        .await?;

    Ok(Json(ListResponse {
        count,
        results: categories.into_iter().map(CategoryResponse::from).collect(),
    }))
}

/// POST /categories
pub async fn create_category<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<ReferenceCreateRequest>,
) -> ReviewsResult<impl IntoResponse>
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
    let use_case = CategoriesUseCase::new(state.store.clone());
    let category = use_case.create(&principal, req.name, req.slug).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// DELETE /categories/{slug}
pub async fn delete_category<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Path(slug): Path<String>,
) -> ReviewsResult<StatusCode>
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
    let use_case = CategoriesUseCase::new(state.store.clone());
    use_case.delete(&principal, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Genres
// ============================================================================

/// GET /genres
pub async fn list_genres<S>(
    State(state): State<ReviewsAppState<S>>,
    Query(query): Query<SearchQuery>,
) -> ReviewsResult<Json<ListResponse<GenreResponse>>>
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
    let use_case = GenresUseCase::new(state.store.clone());
    let (genres, count) = use_case
        .list(query.search.as_deref(), query.pagination())
        .await?;

    Ok(Json(ListResponse {
        count,
        results: genres.into_iter().map(GenreResponse::from).collect(),
    }))
}

/// POST /genres
pub async fn create_genre<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<ReferenceCreateRequest>,
) -> ReviewsResult<impl IntoResponse>
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
    let use_case = GenresUseCase::new(state.store.clone());
    let genre = use_case.create(&principal, req.name, req.slug).await?;
    Ok((StatusCode::CREATED, Json(GenreResponse::from(genre))))
}

/// DELETE /genres/{slug}
pub async fn delete_genre<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Path(slug): Path<String>,
) -> ReviewsResult<StatusCode>
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
    let use_case = GenresUseCase::new(state.store.clone());
    use_case.delete(&principal, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Titles
// ============================================================================

/// GET /titles
pub async fn list_titles<S>(
    State(state): State<ReviewsAppState<S>>,
    Query(query): Query<TitleQuery>,
) -> ReviewsResult<Json<ListResponse<TitleResponse>>>
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
    let use_case = TitlesUseCase::new(
        state.store.clone(),
        state.store.clone(),
        state.store.clone(),
    );
    let (titles, count) = use_case.list(query.filter(), query.pagination()).await?;

    Ok(Json(ListResponse {
        count,
        results: titles.into_iter().map(TitleResponse::from).collect(),
    }))
}

/// POST /titles
pub async fn create_title<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<TitleCreateRequest>,
) -> ReviewsResult<impl IntoResponse>
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
    let use_case = TitlesUseCase::new(
        state.store.clone(),
        state.store.clone(),
        state.store.clone(),
    );
    let title = use_case
        .create(
            &principal,
            TitleInput {
                name: req.name,
                year: req.year,
                description: req.description,
                category: req.category,
                genre: req.genre,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(TitleResponse::from(title))))
}

/// GET /titles/{title_id}
pub async fn get_title<S>(
    State(state): State<ReviewsAppState<S>>,
    Path(title_id): Path<Uuid>,
) -> ReviewsResult<Json<TitleResponse>>
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
    let use_case = TitlesUseCase::new(
        state.store.clone(),
        state.store.clone(),
        state.store.clone(),
    );
    let title = use_case.get(&TitleId::from_uuid(title_id)).await?;
    Ok(Json(TitleResponse::from(title)))
}

/// PATCH /titles/{title_id}
pub async fn patch_title<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Path(title_id): Path<Uuid>,
    Json(req): Json<TitlePatchRequest>,
) -> ReviewsResult<Json<TitleResponse>>
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
    let use_case = TitlesUseCase::new(
        state.store.clone(),
        state.store.clone(),
        state.store.clone(),
    );
    let title = use_case
        .update(
            &principal,
            &TitleId::from_uuid(title_id),
            TitlePatch {
                name: req.name,
                year: req.year,
                description: req.description,
                category: req.category,
                genre: req.genre,
            },
        )
        .await?;

    Ok(Json(TitleResponse::from(title)))
}

/// DELETE /titles/{title_id}
pub async fn delete_title<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Path(title_id): Path<Uuid>,
) -> ReviewsResult<StatusCode>
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
    let use_case = TitlesUseCase::new(
        state.store.clone(),
        state.store.clone(),
        state.store.clone(),
    );
    use_case
        .delete(&principal, &TitleId::from_uuid(title_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
