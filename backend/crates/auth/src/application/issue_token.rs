//! Token Issue Use Case
//!
//! Exchanges a confirmation code for an access token.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::domain::confirmation::ConfirmationCodeIssuer;
use crate::domain::repository::UserRepository;
use crate::domain::token::AccessTokenCodec;
use crate::domain::value_object::Username;
use crate::error::{AuthError, AuthResult};

/// Token issue input
pub struct IssueTokenInput {
    pub username: String,
    pub confirmation_code: String,
}

/// Token issue output
#[derive(Debug)]
pub struct IssueTokenOutput {
    pub token: String,
}

/// Token issue use case
pub struct IssueTokenUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> IssueTokenUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// An unknown username is a 404; a wrong code for a known user is a
    /// field-keyed validation error. The distinction is part of the API
    /// contract.
    pub async fn execute(&self, input: IssueTokenInput) -> AuthResult<IssueTokenOutput> {
        let username = Username::new(input.username)?;

        let mut user = self
            .user_repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let issuer = ConfirmationCodeIssuer::new(self.config.token_secret);
        if !issuer.verify(&user, &input.confirmation_code) {
            return Err(AuthError::InvalidCode);
        }

        if !user.confirmed {
            user.confirm();
            self.user_repo.update(&user).await?;
        }

        let codec = AccessTokenCodec::new(self.config.token_secret);
        let token = codec.mint(&user.user_id, Utc::now(), self.config.token_ttl);

        tracing::info!(username = %user.username, "Access token issued");

        Ok(IssueTokenOutput { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::User;
    use crate::domain::value_object::Email;
    use crate::infra::memory::InMemoryUserRepository;

    async fn seeded() -> (Arc<InMemoryUserRepository>, Arc<AuthConfig>, User) {
        let repo = Arc::new(InMemoryUserRepository::default());
        let config = Arc::new(AuthConfig::with_random_secret());
        let user = User::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
        );
        repo.create(&user).await.unwrap();
        (repo, config, user)
    }

    #[tokio::test]
    async fn test_valid_code_mints_token_and_confirms() {
        let (repo, config, user) = seeded().await;
        let code = ConfirmationCodeIssuer::new(config.token_secret).derive(&user);

        let uc = IssueTokenUseCase::new(Arc::clone(&repo), Arc::clone(&config));
        let out = uc
            .execute(IssueTokenInput {
                username: "alice".to_string(),
                confirmation_code: code,
            })
            .await
            .unwrap();

        let subject = AccessTokenCodec::new(config.token_secret)
            .verify(&out.token, Utc::now())
            .unwrap();
        assert_eq!(subject, user.user_id);

        let stored = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert!(stored.confirmed);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (repo, config, _) = seeded().await;
        let uc = IssueTokenUseCase::new(repo, config);
        let err = uc
            .execute(IssueTokenInput {
                username: "nobody".to_string(),
                confirmation_code: "whatever".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_wrong_code_is_invalid_code() {
        let (repo, config, _) = seeded().await;
        let uc = IssueTokenUseCase::new(repo, config);
        let err = uc
            .execute(IssueTokenInput {
                username: "alice".to_string(),
                confirmation_code: "bogus".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCode));
    }

    #[tokio::test]
    async fn test_code_survives_until_next_signup() {
        let (repo, config, user) = seeded().await;
        let code = ConfirmationCodeIssuer::new(config.token_secret).derive(&user);

        let mut refreshed = user.clone();
        std::thread::sleep(std::time::Duration::from_millis(2));
        refreshed.refresh_code_state();
        repo.update(&refreshed).await.unwrap();

        let uc = IssueTokenUseCase::new(repo, config);
        let err = uc
            .execute(IssueTokenInput {
                username: "alice".to_string(),
                confirmation_code: code,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCode));
    }
}
