//! Application Layer

pub mod config;
pub mod issue_token;
pub mod manage_users;
pub mod me;
pub mod signup;

pub use config::AuthConfig;
pub use issue_token::{IssueTokenInput, IssueTokenOutput, IssueTokenUseCase};
pub use manage_users::{
    AdminCreateUserInput, AdminUpdateUserInput, ManageUsersUseCase, UserListOutput,
};
pub use me::{MeUpdateInput, MeUseCase};
pub use signup::{SignUpInput, SignUpOutput, SignUpUseCase};
