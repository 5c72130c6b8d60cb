//! Principal Resolution Middleware
//!
//! Resolves `Authorization: Bearer <token>` into a [`Principal`] stored in
//! request extensions. Missing or invalid credentials resolve to
//! [`Principal::Anonymous`] rather than failing the request; denials are
//! the policy evaluator's job and surface as 403 per route.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::policy::Principal;
use crate::domain::repository::UserRepository;
use crate::domain::token::AccessTokenCodec;

/// Middleware state
pub struct PrincipalState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for PrincipalState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
        }
    }
}

/// Middleware that resolves the acting principal for every request
pub async fn resolve_principal<R>(
    State(state): State<PrincipalState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
{
    let principal = match bearer_token(&req) {
        Some(token) => lookup_principal(&state, token).await,
        None => Principal::Anonymous,
    };

    req.extensions_mut().insert(principal);
    next.run(req).await
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn lookup_principal<R>(state: &PrincipalState<R>, token: &str) -> Principal
where
    R: UserRepository + Send + Sync + 'static,
{
    let codec = AccessTokenCodec::new(state.config.token_secret);
    let user_id = match codec.verify(token, Utc::now()) {
        Ok(user_id) => user_id,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected bearer token");
            return Principal::Anonymous;
        }
    };

    // Role and staff flag come from the row, not the token, so a role
    // change takes effect immediately.
    match state.repo.find_by_id(&user_id).await {
        Ok(Some(user)) => user.principal(),
        Ok(None) => Principal::Anonymous,
        Err(err) => {
            tracing::error!(error = %err, "Principal lookup failed");
            Principal::Anonymous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::User;
    use crate::domain::value_object::{Email, Username};
    use crate::infra::memory::InMemoryUserRepository;
    use axum::Router;
    use axum::body::to_bytes;
    use axum::extract::Extension;
    use axum::routing::get;
    use tower::ServiceExt;

    async fn whoami(Extension(principal): Extension<Principal>) -> String {
        match principal {
            Principal::Anonymous => "anonymous".to_string(),
            Principal::Known { user_id, .. } => user_id.to_string(),
        }
    }

    async fn test_app() -> (Router, User, Arc<AuthConfig>) {
        let repo = Arc::new(InMemoryUserRepository::default());
        let config = Arc::new(AuthConfig::with_random_secret());
        let user = User::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
        );
        use crate::domain::repository::UserRepository as _;
        repo.create(&user).await.unwrap();

        let state = PrincipalState {
            repo,
            config: Arc::clone(&config),
        };
        let app = Router::new()
            .route("/whoami", get(whoami))
            .layer(axum::middleware::from_fn_with_state(
                state,
                resolve_principal::<InMemoryUserRepository>,
            ));
        (app, user, config)
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_no_header_is_anonymous() {
        let (app, _, _) = test_app().await;
        let response = app
            .oneshot(Request::get("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_string(response).await, "anonymous");
    }

    #[tokio::test]
    async fn test_valid_token_resolves_user() {
        let (app, user, config) = test_app().await;
        let token = AccessTokenCodec::new(config.token_secret).mint(
            &user.user_id,
            Utc::now(),
            config.token_ttl,
        );
        let response = app
            .oneshot(
                Request::get("/whoami")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_string(response).await, user.user_id.to_string());
    }

    #[tokio::test]
    async fn test_garbage_token_is_anonymous() {
        let (app, _, _) = test_app().await;
        let response = app
            .oneshot(
                Request::get("/whoami")
                    .header(header::AUTHORIZATION, "Bearer garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_string(response).await, "anonymous");
    }
}
