//! Value Object Module

pub mod email;
pub mod user_role;
pub mod username;

pub use email::{Email, EmailError};
pub use user_role::{RoleParseError, UserRole};
pub use username::{Username, UsernameError};
