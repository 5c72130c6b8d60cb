//! Auth (Identity & Access) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Passwordless signup: username + email, confirmation code by mail
//! - Code-to-token exchange minting stateless bearer access tokens
//! - Role-based access (User, Moderator, Admin) plus a staff override
//! - Pure permission evaluator shared by all resource routers
//! - User administration and `me` self-service endpoints
//!
//! ## Security Model
//! - Confirmation codes are HMAC-derived from the user's current state,
//!   never stored; a state change invalidates outstanding codes
//! - Access tokens are HMAC-signed and time-bound, no refresh tokens
//! - Uniqueness of username/email is enforced by database constraints;
//!   application pre-checks exist only to produce friendly errors

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::policy::{Action, Decision, Principal};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{auth_router, users_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
