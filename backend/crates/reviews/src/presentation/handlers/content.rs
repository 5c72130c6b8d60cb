//! Review and Comment Handlers

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use auth::domain::policy::Principal;
use kernel::id::{CommentId, ReviewId, TitleId};
use kernel::pagination::Pagination;

use crate::application::{
    CommentInput, CommentPatch, CommentsUseCase, ReviewInput, ReviewPatch, ReviewsUseCase,
};
use crate::domain::repository::{
    CategoryRepository, CommentRepository, GenreRepository, ReviewRepository, TitleRepository,
};
use crate::error::ReviewsResult;
use crate::presentation::dto::{
    CommentCreateRequest, CommentPatchRequest, CommentResponse, ListResponse, ReviewCreateRequest,
    ReviewPatchRequest, ReviewResponse,
};
use crate::presentation::handlers::ReviewsAppState;

// ============================================================================
// Reviews
// ============================================================================

/// GET /titles/{title_id}/reviews
pub async fn list_reviews<S>(
    State(state): State<ReviewsAppState<S>>,
    Path(title_id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> ReviewsResult<Json<ListResponse<ReviewResponse>>>
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
    let use_case = ReviewsUseCase::new(state.store.clone(), state.store.clone());
    let (reviews, count) = use_case.list(&TitleId::from_uuid(title_id), page).await?;

    Ok(Json(ListResponse {
        count,
        results: reviews.into_iter().map(ReviewResponse::from).collect(),
    }))
}

/// POST /titles/{title_id}/reviews
pub async fn create_review<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Path(title_id): Path<Uuid>,
    Json(req): Json<ReviewCreateRequest>,
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
    let use_case = ReviewsUseCase::new(state.store.clone(), state.store.clone());
    let review = use_case
        .create(
            &principal,
            &TitleId::from_uuid(title_id),
            ReviewInput {
                text: req.text,
                score: req.score,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}

/// GET /titles/{title_id}/reviews/{review_id}
pub async fn get_review<S>(
    State(state): State<ReviewsAppState<S>>,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
) -> ReviewsResult<Json<ReviewResponse>>
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
    let use_case = ReviewsUseCase::new(state.store.clone(), state.store.clone());
    let review = use_case
        .get(&TitleId::from_uuid(title_id), &ReviewId::from_uuid(review_id))
        .await?;
    Ok(Json(ReviewResponse::from(review)))
}

/// PATCH /titles/{title_id}/reviews/{review_id}
pub async fn patch_review<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<ReviewPatchRequest>,
) -> ReviewsResult<Json<ReviewResponse>>
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
    let use_case = ReviewsUseCase::new(state.store.clone(), state.store.clone());
    let review = use_case
        .update(
            &principal,
            &TitleId::from_uuid(title_id),
            &ReviewId::from_uuid(review_id),
            ReviewPatch {
                text: req.text,
                score: req.score,
            },
        )
        .await?;

    Ok(Json(ReviewResponse::from(review)))
}

/// DELETE /titles/{title_id}/reviews/{review_id}
pub async fn delete_review<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
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
    let use_case = ReviewsUseCase::new(state.store.clone(), state.store.clone());
    use_case
        .delete(
            &principal,
            &TitleId::from_uuid(title_id),
            &ReviewId::from_uuid(review_id),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

/// GET /titles/{title_id}/reviews/{review_id}/comments
pub async fn list_comments<S>(
    State(state): State<ReviewsAppState<S>>,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
    Query(page): Query<Pagination>,
) -> ReviewsResult<Json<ListResponse<CommentResponse>>>
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
    let use_case = CommentsUseCase::new(state.store.clone(), state.store.clone());
    let (comments, count) = use_case
        .list(
            &TitleId::from_uuid(title_id),
            &ReviewId::from_uuid(review_id),
            page,
        )
        .await?;

    Ok(Json(ListResponse {
        count,
        results: comments.into_iter().map(CommentResponse::from).collect(),
    }))
}

/// POST /titles/{title_id}/reviews/{review_id}/comments
pub async fn create_comment<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<CommentCreateRequest>,
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
    let use_case = CommentsUseCase::new(state.store.clone(), state.store.clone());
    let comment = use_case
        .create(
            &principal,
            &TitleId::from_uuid(title_id),
            &ReviewId::from_uuid(review_id),
            CommentInput { text: req.text },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

/// GET /titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn get_comment<S>(
    State(state): State<ReviewsAppState<S>>,
    Path((title_id, review_id, comment_id)): Path<(Uuid, Uuid, Uuid)>,
) -> ReviewsResult<Json<CommentResponse>>
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
    let use_case = CommentsUseCase::new(state.store.clone(), state.store.clone());
    let comment = use_case
        .get(
            &TitleId::from_uuid(title_id),
            &ReviewId::from_uuid(review_id),
            &CommentId::from_uuid(comment_id),
        )
        .await?;
    Ok(Json(CommentResponse::from(comment)))
}

/// PATCH /titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn patch_comment<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Path((title_id, review_id, comment_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(req): Json<CommentPatchRequest>,
) -> ReviewsResult<Json<CommentResponse>>
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
    let use_case = CommentsUseCase::new(state.store.clone(), state.store.clone());
    let comment = use_case
        .update(
            &principal,
            &TitleId::from_uuid(title_id),
            &ReviewId::from_uuid(review_id),
            &CommentId::from_uuid(comment_id),
            CommentPatch { text: req.text },
        )
        .await?;

    Ok(Json(CommentResponse::from(comment)))
}

/// DELETE /titles/{title_id}/reviews/{review_id}/comments/{comment_id}
pub async fn delete_comment<S>(
    State(state): State<ReviewsAppState<S>>,
    Extension(principal): Extension<Principal>,
    Path((title_id, review_id, comment_id)): Path<(Uuid, Uuid, Uuid)>,
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
    let use_case = CommentsUseCase::new(state.store.clone(), state.store.clone());
    use_case
        .delete(
            &principal,
            &TitleId::from_uuid(title_id),
            &ReviewId::from_uuid(review_id),
            &CommentId::from_uuid(comment_id),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
