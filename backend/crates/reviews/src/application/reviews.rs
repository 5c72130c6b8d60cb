//! Review Use Cases
//!
//! Reviews live under a title. Any authenticated user may post one
//! review per title; editing and deletion are for the author, a
//! moderator or an admin.

use std::sync::Arc;

use auth::domain::policy::{Action, Principal, allow_content, allow_content_object};
use kernel::id::{ReviewId, TitleId};
use kernel::pagination::Pagination;

use crate::application::validate_text;
use crate::domain::entity::Review;
use crate::domain::repository::{ReviewRepository, TitleRepository};
use crate::domain::value_object::Score;
use crate::error::{ReviewsError, ReviewsResult};

/// Fields accepted when posting a review
pub struct ReviewInput {
    pub text: String,
    pub score: i16,
}

/// Fields accepted when patching a review; absent fields stay untouched
#[derive(Default)]
pub struct ReviewPatch {
    pub text: Option<String>,
    pub score: Option<i16>,
}

/// Review use case
pub struct ReviewsUseCase<R, T>
where
    R: ReviewRepository,
    T: TitleRepository,
{
    reviews: Arc<R>,
    titles: Arc<T>,
}

impl<R, T> ReviewsUseCase<R, T>
where
    R: ReviewRepository,
    T: TitleRepository,
{
    pub fn new(reviews: Arc<R>, titles: Arc<T>) -> Self {
        Self { reviews, titles }
    }

    pub async fn list(
        &self,
        title_id: &TitleId,
        page: Pagination,
    ) -> ReviewsResult<(Vec<Review>, i64)> {
        self.ensure_title(title_id).await?;
        let page = page.clamped();
        let reviews = self.reviews.list_by_title(title_id, &page).await?;
        let total = self.reviews.count_by_title(title_id).await?;
        Ok((reviews, total))
    }

    pub async fn get(&self, title_id: &TitleId, review_id: &ReviewId) -> ReviewsResult<Review> {
        self.ensure_title(title_id).await?;
        self.reviews
            .find_by_id(title_id, review_id)
            .await?
            .ok_or(ReviewsError::ReviewNotFound)
    }

    pub async fn create(
        &self,
        principal: &Principal,
        title_id: &TitleId,
        input: ReviewInput,
    ) -> ReviewsResult<Review> {
        if !allow_content(principal, Action::Write).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }
        let author_id = *principal.user_id().ok_or(ReviewsError::Forbidden)?;

        self.ensure_title(title_id).await?;

        // Pre-check for the friendly error; the unique constraint on
        // (author, title) remains the source of truth under races.
        if self
            .reviews
            .exists_by_author_and_title(&author_id, title_id)
            .await?
        {
            return Err(ReviewsError::DuplicateReview);
        }

        let text = validate_text(input.text)?;
        let score = Score::new(input.score)?;
        let review = Review::new(*title_id, author_id, text, score);
        let review = self.reviews.create(&review).await?;
        tracing::info!(review_id = %review.review_id, title_id = %title_id, "Review posted");
        Ok(review)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        title_id: &TitleId,
        review_id: &ReviewId,
        patch: ReviewPatch,
    ) -> ReviewsResult<Review> {
        let mut review = self.get(title_id, review_id).await?;
        if !allow_content_object(principal, Action::Write, &review.author_id).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }

        let text = match patch.text {
            Some(text) => validate_text(text)?,
            None => review.text.clone(),
        };
        let score = match patch.score {
            Some(score) => Score::new(score)?,
            None => review.score,
        };
        review.edit(text, score);

        self.reviews.update(&review).await?;
        Ok(review)
    }

    pub async fn delete(
        &self,
        principal: &Principal,
        title_id: &TitleId,
        review_id: &ReviewId,
    ) -> ReviewsResult<()> {
        let review = self.get(title_id, review_id).await?;
        if !allow_content_object(principal, Action::Write, &review.author_id).is_allowed() {
            return Err(ReviewsError::Forbidden);
        }
        self.reviews.delete(review_id).await?;
        tracing::info!(review_id = %review_id, "Review deleted");
        Ok(())
    }

    async fn ensure_title(&self, title_id: &TitleId) -> ReviewsResult<()> {
        self.titles
            .find_by_id(title_id)
            .await?
            .map(|_| ())
            .ok_or(ReviewsError::TitleNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::catalog::CategoriesUseCase;
    use crate::application::titles::{TitleInput, TitlesUseCase};
    use auth::domain::value_object::UserRole;
    use kernel::id::UserId;

    use crate::infra::memory::InMemoryReviewsRepository;

    fn admin() -> Principal {
        Principal::Known {
            user_id: UserId::new(),
            role: UserRole::Admin,
            is_staff: false,
        }
    }

    fn reader(store: &Arc<InMemoryReviewsRepository>, name: &str) -> Principal {
        let user_id = UserId::new();
        store.register_author(&user_id, name);
        Principal::Known {
            user_id,
            role: UserRole::User,
            is_staff: false,
        }
    }

    fn moderator(store: &Arc<InMemoryReviewsRepository>) -> Principal {
        let user_id = UserId::new();
        store.register_author(&user_id, "mod");
        Principal::Known {
            user_id,
            role: UserRole::Moderator,
            is_staff: false,
        }
    }

    async fn seeded() -> (
        ReviewsUseCase<InMemoryReviewsRepository, InMemoryReviewsRepository>,
        Arc<InMemoryReviewsRepository>,
        TitleId,
    ) {
        let store = Arc::new(InMemoryReviewsRepository::default());
        CategoriesUseCase::new(Arc::clone(&store))
            .create(&admin(), "Films".to_string(), "films".to_string())
            .await
            .unwrap();
        let title = TitlesUseCase::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&store))
            .create(
                &admin(),
                TitleInput {
                    name: "Gattaca".to_string(),
                    year: 1997,
                    description: None,
                    category: Some("films".to_string()),
                    genre: vec![],
                },
            )
            .await
            .unwrap();
        (
            ReviewsUseCase::new(Arc::clone(&store), Arc::clone(&store)),
            store,
            title.title_id,
        )
    }

    fn input(score: i16) -> ReviewInput {
        ReviewInput {
            text: "Watched it twice".to_string(),
            score,
        }
    }

    #[tokio::test]
    async fn test_anonymous_cannot_post() {
        let (uc, _, title_id) = seeded().await;
        let err = uc
            .create(&Principal::Anonymous, &title_id, input(8))
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewsError::Forbidden));
    }

    #[tokio::test]
    async fn test_post_and_read_back() {
        let (uc, store, title_id) = seeded().await;
        let alice = reader(&store, "alice");
        let review = uc.create(&alice, &title_id, input(8)).await.unwrap();
        assert_eq!(review.author_username, "alice");
        assert_eq!(review.score.value(), 8);

        let (reviews, total) = uc.list(&title_id, Pagination::default()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(reviews[0].review_id, review.review_id);
    }

    #[tokio::test]
    async fn test_second_review_same_title_rejected() {
        let (uc, store, title_id) = seeded().await;
        let alice = reader(&store, "alice");
        uc.create(&alice, &title_id, input(8)).await.unwrap();
        let err = uc.create(&alice, &title_id, input(3)).await.unwrap_err();
        assert!(matches!(err, ReviewsError::DuplicateReview));
    }

    #[tokio::test]
    async fn test_score_out_of_range_rejected() {
        let (uc, store, title_id) = seeded().await;
        let alice = reader(&store, "alice");
        let err = uc.create(&alice, &title_id, input(11)).await.unwrap_err();
        assert!(matches!(err, ReviewsError::InvalidScore(_)));
    }

    #[tokio::test]
    async fn test_unknown_title_is_not_found() {
        let (uc, store, _) = seeded().await;
        let alice = reader(&store, "alice");
        let err = uc
            .create(&alice, &TitleId::new(), input(8))
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewsError::TitleNotFound));
    }

    #[tokio::test]
    async fn test_stranger_cannot_edit_but_moderator_can() {
        let (uc, store, title_id) = seeded().await;
        let alice = reader(&store, "alice");
        let review = uc.create(&alice, &title_id, input(8)).await.unwrap();

        let bob = reader(&store, "bob");
        let err = uc
            .update(
                &bob,
                &title_id,
                &review.review_id,
                ReviewPatch {
                    score: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewsError::Forbidden));

        let updated = uc
            .update(
                &moderator(&store),
                &title_id,
                &review.review_id,
                ReviewPatch {
                    text: Some("Edited by a moderator".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.text, "Edited by a moderator");
        assert_eq!(updated.score.value(), 8);
        assert_eq!(updated.pub_date, review.pub_date);
    }

    #[tokio::test]
    async fn test_author_deletes_and_rating_recomputes() {
        let (uc, store, title_id) = seeded().await;
        let alice = reader(&store, "alice");
        let bob = reader(&store, "bob");
        let review = uc.create(&alice, &title_id, input(7)).await.unwrap();
        uc.create(
            &bob,
            &title_id,
            ReviewInput {
                text: "Fine".to_string(),
                score: 9,
            },
        )
        .await
        .unwrap();

        let title = TitleRepository::find_by_id(store.as_ref(), &title_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(title.rating, Some(8.0));

        uc.delete(&alice, &title_id, &review.review_id).await.unwrap();
        let title = TitleRepository::find_by_id(store.as_ref(), &title_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(title.rating, Some(9.0));
    }
}
