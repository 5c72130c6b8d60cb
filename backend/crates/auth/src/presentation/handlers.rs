//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use kernel::pagination::Pagination;
use platform::mailer::Mailer;

use crate::application::{
    AdminCreateUserInput, AdminUpdateUserInput, AuthConfig, IssueTokenInput, IssueTokenUseCase,
    ManageUsersUseCase, MeUpdateInput, MeUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::policy::Principal;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AdminCreateUserRequest, AdminUpdateUserRequest, MeUpdateRequest, SignUpRequest,
    SignUpResponse, TokenRequest, TokenResponse, UserListResponse, UserResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R, M>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
}

impl<R, M> Clone for AuthAppState<R, M>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            mailer: Arc::clone(&self.mailer),
            config: Arc::clone(&self.config),
        }
    }
}

// ============================================================================
// Sign Up / Token
// ============================================================================

/// POST /auth/signup
pub async fn sign_up<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<Json<SignUpResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            username: req.username,
            email: req.email,
        })
        .await?;

    Ok(Json(SignUpResponse {
        username: output.username,
        email: output.email,
    }))
}

/// POST /auth/token
pub async fn issue_token<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<TokenRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = IssueTokenUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(IssueTokenInput {
            username: req.username,
            confirmation_code: req.confirmation_code,
        })
        .await?;

    Ok(Json(TokenResponse {
        token: output.token,
    }))
}

// ============================================================================
// User Administration
// ============================================================================

/// GET /users
pub async fn list_users<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(principal): Extension<Principal>,
    Query(page): Query<Pagination>,
) -> AuthResult<Json<UserListResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ManageUsersUseCase::new(state.repo.clone());
    let output = use_case.list(&principal, page).await?;

    Ok(Json(UserListResponse {
        count: output.total,
        results: output.users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// POST /users
pub async fn create_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<AdminCreateUserRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ManageUsersUseCase::new(state.repo.clone());
    let user = use_case
        .create(
            &principal,
            AdminCreateUserInput {
                username: req.username,
                email: req.email,
                first_name: req.first_name,
                last_name: req.last_name,
                bio: req.bio,
                role: req.role,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/{username}
pub async fn get_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(principal): Extension<Principal>,
    Path(username): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ManageUsersUseCase::new(state.repo.clone());
    let user = use_case.get(&principal, &username).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PATCH /users/{username}
pub async fn patch_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(principal): Extension<Principal>,
    Path(username): Path<String>,
    Json(req): Json<AdminUpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ManageUsersUseCase::new(state.repo.clone());
    let user = use_case
        .update(
            &principal,
            &username,
            AdminUpdateUserInput {
                username: req.username,
                email: req.email,
                first_name: req.first_name,
                last_name: req.last_name,
                bio: req.bio,
                role: req.role,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/{username}
pub async fn delete_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(principal): Extension<Principal>,
    Path(username): Path<String>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ManageUsersUseCase::new(state.repo.clone());
    use_case.delete(&principal, &username).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Self Service
// ============================================================================

/// GET /users/me
pub async fn get_me<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(principal): Extension<Principal>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = MeUseCase::new(state.repo.clone());
    let user = use_case.get(&principal).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PATCH /users/me
pub async fn patch_me<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<MeUpdateRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = MeUseCase::new(state.repo.clone());
    let user = use_case
        .update(
            &principal,
            MeUpdateInput {
                username: req.username,
                email: req.email,
                first_name: req.first_name,
                last_name: req.last_name,
                bio: req.bio,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}
