//! User Administration Use Case
//!
//! Admin-only CRUD over the user collection, addressed by username.

use std::sync::Arc;

use kernel::pagination::Pagination;

use crate::domain::entity::User;
use crate::domain::policy::{Principal, allow_user_admin};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserRole, Username};
use crate::error::{AuthError, AuthResult};

/// Fields accepted when an admin creates a user
pub struct AdminCreateUserInput {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
}

/// Fields accepted when an admin patches a user; absent fields are untouched
#[derive(Default)]
pub struct AdminUpdateUserInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
}

/// Paginated listing output
pub struct UserListOutput {
    pub users: Vec<User>,
    pub total: i64,
}

/// User administration use case
pub struct ManageUsersUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> ManageUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn list(
        &self,
        principal: &Principal,
        page: Pagination,
    ) -> AuthResult<UserListOutput> {
        if !allow_user_admin(principal).is_allowed() {
            return Err(AuthError::Forbidden);
        }
        let page = page.clamped();
        let users = self.user_repo.list(&page).await?;
        let total = self.user_repo.count().await?;
        Ok(UserListOutput { users, total })
    }

    pub async fn get(&self, principal: &Principal, username: &str) -> AuthResult<User> {
        if !allow_user_admin(principal).is_allowed() {
            return Err(AuthError::Forbidden);
        }
        self.find(username).await
    }

    pub async fn create(
        &self,
        principal: &Principal,
        input: AdminCreateUserInput,
    ) -> AuthResult<User> {
        if !allow_user_admin(principal).is_allowed() {
            return Err(AuthError::Forbidden);
        }

        let username = Username::new(input.username)?;
        let email = Email::new(input.email)?;

        if self.user_repo.exists_by_username(&username).await? {
            return Err(AuthError::UsernameTaken);
        }
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let mut user = User::new(username, email);
        user.first_name = input.first_name;
        user.last_name = input.last_name;
        if let Some(bio) = input.bio {
            user.bio = bio;
        }
        if let Some(role) = input.role {
            user.set_role(UserRole::from_code(&role)?);
        }

        self.user_repo.create(&user).await?;
        tracing::info!(username = %user.username, role = %user.role, "User created by admin");
        Ok(user)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        username: &str,
        input: AdminUpdateUserInput,
    ) -> AuthResult<User> {
        if !allow_user_admin(principal).is_allowed() {
            return Err(AuthError::Forbidden);
        }

        let mut user = self.find(username).await?;

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
        if let Some(role) = input.role {
            user.set_role(UserRole::from_code(&role)?);
        }

        self.user_repo.update(&user).await?;
        Ok(user)
    }

    pub async fn delete(&self, principal: &Principal, username: &str) -> AuthResult<()> {
        if !allow_user_admin(principal).is_allowed() {
            return Err(AuthError::Forbidden);
        }
        let user = self.find(username).await?;
        self.user_repo.delete(&user.user_id).await?;
        tracing::info!(username = %user.username, "User deleted by admin");
        Ok(())
    }

    async fn find(&self, username: &str) -> AuthResult<User> {
        let username = Username::new(username).map_err(|_| AuthError::UserNotFound)?;
        self.user_repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryUserRepository;
    use kernel::id::UserId;

    fn admin() -> Principal {
        Principal::Known {
            user_id: UserId::new(),
            role: UserRole::Admin,
            is_staff: false,
        }
    }

    fn plain_user() -> Principal {
        Principal::Known {
            user_id: UserId::new(),
            role: UserRole::User,
            is_staff: false,
        }
    }

    fn uc() -> ManageUsersUseCase<InMemoryUserRepository> {
        ManageUsersUseCase::new(Arc::new(InMemoryUserRepository::default()))
    }

    fn create_input(username: &str, email: &str) -> AdminCreateUserInput {
        AdminCreateUserInput {
            username: username.to_string(),
            email: email.to_string(),
            first_name: None,
            last_name: None,
            bio: None,
            role: None,
        }
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let uc = uc();
        let principal = plain_user();
        assert!(matches!(
            uc.list(&principal, Pagination::default()).await,
            Err(AuthError::Forbidden)
        ));
        assert!(matches!(
            uc.delete(&principal, "alice").await,
            Err(AuthError::Forbidden)
        ));
        assert!(matches!(
            uc.create(&Principal::Anonymous, create_input("x", "x@example.com"))
                .await,
            Err(AuthError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_admin_creates_with_role() {
        let uc = uc();
        let mut input = create_input("mod", "mod@example.com");
        input.role = Some("moderator".to_string());
        let user = uc.create(&admin(), input).await.unwrap();
        assert_eq!(user.role, UserRole::Moderator);
    }

    #[tokio::test]
    async fn test_unknown_role_rejected() {
        let uc = uc();
        let mut input = create_input("x", "x@example.com");
        input.role = Some("overlord".to_string());
        assert!(matches!(
            uc.create(&admin(), input).await,
            Err(AuthError::InvalidRole(_))
        ));
    }

    #[tokio::test]
    async fn test_patch_changes_only_given_fields() {
        let uc = uc();
        uc.create(&admin(), create_input("alice", "alice@example.com"))
            .await
            .unwrap();

        let updated = uc
            .update(
                &admin(),
                "alice",
                AdminUpdateUserInput {
                    bio: Some("hello".to_string()),
                    role: Some("admin".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.bio, "hello");
        assert_eq!(updated.role, UserRole::Admin);
        assert_eq!(updated.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_get_unknown_user() {
        let uc = uc();
        assert!(matches!(
            uc.get(&admin(), "ghost").await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_then_gone() {
        let uc = uc();
        uc.create(&admin(), create_input("alice", "alice@example.com"))
            .await
            .unwrap();
        uc.delete(&admin(), "alice").await.unwrap();
        assert!(matches!(
            uc.get(&admin(), "alice").await,
            Err(AuthError::UserNotFound)
        ));
    }
}
