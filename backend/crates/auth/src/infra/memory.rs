//! In-Memory User Repository
//!
//! Map-backed repository used by use-case tests and local development
//! without a database. Mirrors the uniqueness guarantees the Postgres
//! schema enforces with constraints.

use std::collections::HashMap;
use std::sync::RwLock;

use kernel::id::UserId;
use kernel::pagination::Pagination;
use uuid::Uuid;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, Username};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    fn read(&self) -> AuthResult<std::sync::RwLockReadGuard<'_, HashMap<Uuid, User>>> {
        self.users
            .read()
            .map_err(|_| AuthError::Internal("User store lock poisoned".to_string()))
    }

    fn write(&self) -> AuthResult<std::sync::RwLockWriteGuard<'_, HashMap<Uuid, User>>> {
        self.users
            .write()
            .map_err(|_| AuthError::Internal("User store lock poisoned".to_string()))
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.write()?;
        if users.values().any(|u| u.username == user.username) {
            return Err(AuthError::UsernameTaken);
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(user.user_id.into_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.read()?.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        Ok(self
            .read()?
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn find_by_username_and_email(
        &self,
        username: &Username,
        email: &Email,
    ) -> AuthResult<Option<User>> {
        Ok(self
            .read()?
            .values()
            .find(|u| &u.username == username && &u.email == email)
            .cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        Ok(self.read()?.values().any(|u| &u.username == username))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.read()?.values().any(|u| &u.email == email))
    }

    async fn list(&self, page: &Pagination) -> AuthResult<Vec<User>> {
        let page = page.clamped();
        let mut users: Vec<User> = self.read()?.values().cloned().collect();
        users.sort_by(|a, b| a.username.as_str().cmp(b.username.as_str()));
        Ok(users
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn count(&self) -> AuthResult<i64> {
        Ok(self.read()?.len() as i64)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.write()?;
        if !users.contains_key(user.user_id.as_uuid()) {
            return Err(AuthError::UserNotFound);
        }
        users.insert(user.user_id.into_uuid(), user.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        let mut users = self.write()?;
        if users.remove(user_id.as_uuid()).is_none() {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(username: &str, email: &str) -> User {
        User::new(Username::new(username).unwrap(), Email::new(email).unwrap())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::default();
        let user = sample("alice", "alice@example.com");
        repo.create(&user).await.unwrap();

        let found = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert_eq!(found.username, user.username);
    }

    #[tokio::test]
    async fn test_unique_username_enforced() {
        let repo = InMemoryUserRepository::default();
        repo.create(&sample("alice", "a@example.com")).await.unwrap();
        let err = repo
            .create(&sample("alice", "b@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_list_ordered_and_paginated() {
        let repo = InMemoryUserRepository::default();
        repo.create(&sample("carol", "c@example.com")).await.unwrap();
        repo.create(&sample("alice", "a@example.com")).await.unwrap();
        repo.create(&sample("bob", "b@example.com")).await.unwrap();

        let page = Pagination {
            limit: 2,
            offset: 1,
        };
        let users = repo.list(&page).await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "carol"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let repo = InMemoryUserRepository::default();
        let err = repo.delete(&UserId::new()).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }
}
