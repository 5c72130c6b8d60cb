//! Comment Entity

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, ReviewId, UserId};

/// A comment on a review
#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub review_id: ReviewId,
    pub author_id: UserId,
    pub author_username: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

impl Comment {
    pub fn new(review_id: ReviewId, author_id: UserId, text: String) -> Self {
        Self {
            comment_id: CommentId::new(),
            review_id,
            author_id,
            author_username: String::new(),
            text,
            pub_date: Utc::now(),
        }
    }

    /// Edit text, keeping the original publication date
    pub fn edit(&mut self, text: String) {
        self.text = text;
    }
}
