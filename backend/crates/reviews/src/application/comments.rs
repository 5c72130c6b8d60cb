//! Comment Use Cases
//!
//! Comments live under a review, which itself lives under a title; both
//! ancestors must exist for any operation.

use std::sync::Arc;

use auth::domain::policy::{Action, Principal, allow_content, allow_content_object};
use kernel::id::{CommentId, ReviewId, TitleId};
use kernel::pagination::Pagination;

use crate::application::validate_text;
use crate::domain::entity::Comment;
use crate::domain::repository::{CommentRepository, ReviewRepository};
use crate::error::{ReviewsError, ReviewsResult};

/// Fields accepted when posting a comment
pub struct CommentInput {
    pub text: String,
}

/// Fields accepted when patching a comment
#[derive(Default)]
pub struct CommentPatch {
    pub text: Option<String>,
}

/// Comment use case
pub struct CommentsUseCase<C, R>
where
    C: CommentRepository,
    R: ReviewRepository,
{
    comments: Arc<C>,
    reviews: Arc<R>,
}

impl<C, R> CommentsUseCase<C, R>
where
    C: CommentRepository,
    R: ReviewRepository,
{
    pub fn new(comments: Arc<C>, reviews: Arc<R>) -> Self {
        Self { comments, reviews }
    }

    pub async fn list(
        &self,
        title_id: &TitleId,
        review_id: &ReviewId,
        page: Pagination,
    ) -> ReviewsResult<(Vec<Comment>, i64)> {
        self.ensure_review(title_id, review_id).await?;
        let page = page.clamped();
        let comments = self.comments.list_by_review(review_id, &page).await?;
        let total = self.comments.count_by_review(review_id).await?;
        Ok((comments, total))
    }

    pub async fn get(
        &self,
        title_id: &TitleId,
        review_id: &ReviewId,
        comment_id: &CommentId,
    ) -> ReviewsResult<Comment> {
        self.ensure_review(title_id, review_id).await?;
        self.comments
            .find_by_id(review_id, comment_id)
            .await?
            .ok_or(ReviewsError::CommentNotFound)
    }

    pub async fn create(
        &self,
        principal: &Principal,
        title_id: &TitleId,
        review_id: &ReviewId,
        input: CommentInput,
    ) -> ReviewsResult<Comment> {
        if !allow_content(principal, Action::Write).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }
        let author_id = *principal.user_id().ok_or(ReviewsError::Forbidden)?;

        self.ensure_review(title_id, review_id).await?;

        let text = validate_text(input.text)?;
        let comment = Comment::new(*review_id, author_id, text);
        let comment = self.comments.create(&comment).await?;
        tracing::info!(comment_id = %comment.comment_id, review_id = %review_id, "Comment posted");
        Ok(comment)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        title_id: &TitleId,
        review_id: &ReviewId,
        comment_id: &CommentId,
        patch: CommentPatch,
    ) -> ReviewsResult<Comment> {
        let mut comment = self.get(title_id, review_id, comment_id).await?;
        if !allow_content_object(principal, Action::Write, &comment.author_id).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }

        if let Some(text) = patch.text {
            comment.edit(validate_text(text)?);
        }

        self.comments.update(&comment).await?;
        Ok(comment)
    }

    pub async fn delete(
        &self,
        principal: &Principal,
        title_id: &TitleId,
        review_id: &ReviewId,
        comment_id: &CommentId,
    ) -> ReviewsResult<()> {
        let comment = self.get(title_id, review_id, comment_id).await?;
        if !allow_content_object(principal, Action::Write, &comment.author_id).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }
        self.comments.delete(comment_id).await?;
        tracing::info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }

    async fn ensure_review(&self, title_id: &TitleId, review_id: &ReviewId) -> ReviewsResult<()> {
        self.reviews
            .find_by_id(title_id, review_id)
            .await?
            .map(|_| ())
            .ok_or(ReviewsError::ReviewNotFound)
    }
}
