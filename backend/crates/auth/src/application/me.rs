//! Self-Service Profile Use Case
//!
//! The `me` endpoints: any authenticated user reads and edits their own
//! profile. The role field is deliberately absent from the patch input;
//! only an admin may change roles.

use std::sync::Arc;

use crate::domain::entity::User;
use crate::domain::policy::{Principal, allow_self};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, Username};
use crate::error::{AuthError, AuthResult};

/// Fields a user may change on their own profile
#[derive(Default)]
pub struct MeUpdateInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

/// Self-service profile use case
pub struct MeUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> MeUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn get(&self, principal: &Principal) -> AuthResult<User> {
        self.current_user(principal).await
    }

    pub async fn update(&self, principal: &Principal, input: MeUpdateInput) -> AuthResult<User> {
        let mut user = self.current_user(principal).await?;

        if let Some(new_username) = input.username {
            let new_username = Username::new(new_username)?;
            if new_username != user.username
                && self.user_repo.exists_by_username(&new_username).await?
            {
                return Err(AuthError::UsernameTaken);
            }
            user.username = new_username;
        }
        if let Some(new_email) = input.email {
            let new_email = Email::new(new_email)?;
            if new_email != user.email && self.user_repo.exists_by_email(&new_email).await? {
                return Err(AuthError::EmailTaken);
            }
            user.email = new_email;
        }
        if let Some(first_name) = input.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = input.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(bio) = input.bio {
            user.bio = bio;
        }

        self.user_repo.update(&user).await?;
        Ok(user)
    }

    async fn current_user(&self, principal: &Principal) -> AuthResult<User> {
        if !allow_self(principal).is_allowed() {
            return Err(AuthError::Forbidden);
        }
        let user_id = principal.user_id().ok_or(AuthError::Forbidden)?;
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
