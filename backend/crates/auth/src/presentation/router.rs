//! Auth Routers

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Routes for signup and token exchange
pub fn auth_router<R, M>(repo: Arc<R>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo,
        mailer,
        config,
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<R, M>))
        .route("/token", post(handlers::issue_token::<R, M>))
        .with_state(state)
}

/// Routes for user administration and self service
///
/// `/me` is a literal segment and always wins over `/{username}`;
/// the reserved-username rule keeps the two from ever aliasing.
pub fn users_router<R, M>(repo: Arc<R>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo,
        mailer,
        config,
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_users::<R, M>).post(handlers::create_user::<R, M>),
        )
        .route(
            "/me",
            get(handlers::get_me::<R, M>).patch(handlers::patch_me::<R, M>),
        )
        .route(
            "/{username}",
            get(handlers::get_user::<R, M>)
                .patch(handlers::patch_user::<R, M>)
                .delete(handlers::delete_user::<R, M>),
        )
        .with_state(state)
}
