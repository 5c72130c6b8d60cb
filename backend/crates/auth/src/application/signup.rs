//! Sign Up Use Case
//!
//! Registers a user (or re-registers an existing one) and mails a
//! confirmation code. There is no password anywhere in the flow.

use std::sync::Arc;

use platform::mailer::{MailMessage, Mailer};

use crate::application::config::AuthConfig;
use crate::domain::confirmation::ConfirmationCodeIssuer;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, Username};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub username: String,
    pub email: String,
}

/// Sign up output (echoed back in the response body)
#[derive(Debug)]
pub struct SignUpOutput {
    pub username: String,
    pub email: String,
}

/// Sign up use case
pub struct SignUpUseCase<R, M>
where
    R: UserRepository,
    M: Mailer,
{
    user_repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<R, M> SignUpUseCase<R, M>
where
    R: UserRepository + 'static,
    M: Mailer + Sync + Send + 'static,
{
    pub fn new(user_repo: Arc<R>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            mailer,
            config,
        }
    }

    /// Register or re-register
    ///
    /// Submitting the exact (username, email) pair of an existing user is
    /// not an error: the user's code state is refreshed and a fresh code
    /// is mailed. A collision on only one of the two fields is rejected
    /// with a field-keyed validation error.
    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let username = Username::new(input.username)?;
        let email = Email::new(input.email)?;

        let user = match self
            .user_repo
            .find_by_username_and_email(&username, &email)
            .await?
        {
            Some(mut existing) => {
                existing.refresh_code_state();
                self.user_repo.update(&existing).await?;
                tracing::info!(username = %existing.username, "Confirmation code re-issued");
                existing
            }
            None => {
                if self.user_repo.exists_by_username(&username).await? {
                    return Err(AuthError::UsernameTaken);
                }
                if self.user_repo.exists_by_email(&email).await? {
                    return Err(AuthError::EmailTaken);
                }

                let user = User::new(username, email);
                self.user_repo.create(&user).await?;
                tracing::info!(username = %user.username, "User signed up");
                user
            }
        };

        self.send_confirmation_mail(&user);

        Ok(SignUpOutput {
            username: user.username.to_string(),
            email: user.email.to_string(),
        })
    }

    /// Mail delivery runs detached; a delivery failure is logged but does
    /// not fail the registration.
    fn send_confirmation_mail(&self, user: &User) {
        let issuer = ConfirmationCodeIssuer::new(self.config.token_secret);
        let code = issuer.derive(user);
        let message = MailMessage {
            to: user.email.to_string(),
            subject: "Your confirmation code".to_string(),
            body: format!(
                "Hello {}!\n\nYour confirmation code: {}\n",
                user.username, code
            ),
        };

        let mailer = Arc::clone(&self.mailer);
        let username = user.username.to_string();
        tokio::spawn(async move {
            if let Err(err) = mailer.send(message).await {
                tracing::warn!(username = %username, error = %err, "Confirmation mail failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryUserRepository;
    use platform::mailer::TracingMailer;

    fn use_case(
        repo: Arc<InMemoryUserRepository>,
    ) -> SignUpUseCase<InMemoryUserRepository, TracingMailer> {
        SignUpUseCase::new(
            repo,
            Arc::new(TracingMailer::default()),
            Arc::new(AuthConfig::with_random_secret()),
        )
    }

    #[tokio::test]
    async fn test_signup_creates_user() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let out = use_case(Arc::clone(&repo))
            .execute(SignUpInput {
                username: "alice".to_string(),
                email: "Alice@Example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(out.username, "alice");
        assert_eq!(out.email, "alice@example.com");

        let username = Username::new("alice").unwrap();
        let stored = repo.find_by_username(&username).await.unwrap().unwrap();
        assert!(!stored.confirmed);
    }

    #[tokio::test]
    async fn test_signup_same_pair_is_idempotent() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let uc = use_case(Arc::clone(&repo));

        uc.execute(SignUpInput {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .unwrap();

        std::thread::sleep(std::time::Duration::from_millis(2));

        let username = Username::new("alice").unwrap();
        let first = repo.find_by_username(&username).await.unwrap().unwrap();

        uc.execute(SignUpInput {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .unwrap();

        let second = repo.find_by_username(&username).await.unwrap().unwrap();
        assert_eq!(first.user_id, second.user_id);
        assert!(second.code_issued_at > first.code_issued_at);
    }

    #[tokio::test]
    async fn test_signup_username_collision() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let uc = use_case(Arc::clone(&repo));

        uc.execute(SignUpInput {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .unwrap();

        let err = uc
            .execute(SignUpInput {
                username: "alice".to_string(),
                email: "other@example.com".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_signup_email_collision() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let uc = use_case(Arc::clone(&repo));

        uc.execute(SignUpInput {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .unwrap();

        let err = uc
            .execute(SignUpInput {
                username: "bob".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_signup_rejects_reserved_username() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let err = use_case(repo)
            .execute(SignUpInput {
                username: "me".to_string(),
                email: "me@example.com".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidUsername(_)));
    }
}
