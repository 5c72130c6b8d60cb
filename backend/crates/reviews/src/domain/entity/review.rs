//! Review Entity

use chrono::{DateTime, Utc};
use kernel::id::{ReviewId, TitleId, UserId};

use crate::domain::value_object::Score;

/// A user's review of a title
///
/// One review per (author, title); the pair is unique in storage.
/// `author_username` is hydrated from the user record for responses.
#[derive(Debug, Clone)]
pub struct Review {
    pub review_id: ReviewId,
    pub title_id: TitleId,
    pub author_id: UserId,
    pub author_username: String,
    pub text: String,
    pub score: Score,
    pub pub_date: DateTime<Utc>,
}

impl Review {
    pub fn new(title_id: TitleId, author_id: UserId, text: String, score: Score) -> Self {
        Self {
            review_id: ReviewId::new(),
            title_id,
            author_id,
            author_username: String::new(),
            text,
            score,
            pub_date: Utc::now(),
        }
    }

    /// Edit text and score, keeping the original publication date
    pub fn edit(&mut self, text: String, score: Score) {
        self.text = text;
        self.score = score;
    }
}
