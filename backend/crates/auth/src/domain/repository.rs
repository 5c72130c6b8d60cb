//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;
use kernel::pagination::Pagination;

use crate::domain::entity::User;
use crate::domain::value_object::{Email, Username};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>>;

    /// Find user by the exact (username, email) pair
    async fn find_by_username_and_email(
        &self,
        username: &Username,
        email: &Email,
    ) -> AuthResult<Option<User>>;

    /// Check if username exists
    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// List users ordered by username
    async fn list(&self, page: &Pagination) -> AuthResult<Vec<User>>;

    /// Total user count (for paginated listings)
    async fn count(&self) -> AuthResult<i64>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Delete user (cascades to the user's reviews and comments)
    async fn delete(&self, user_id: &UserId) -> AuthResult<()>;
}
