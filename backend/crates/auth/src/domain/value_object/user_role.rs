//! User Role Value Object
//!
//! Three-tier privilege hierarchy stored as a string code. The platform
//! staff/superuser override is a separate flag on the user record, not a
//! role variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned for an unknown role code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleParseError(pub String);

impl fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown role code: {}", self.0)
    }
}

impl std::error::Error for RoleParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Moderator,
    Admin,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            User => "user",
            Moderator => "moderator",
            Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_user(&self) -> bool {
        matches!(self, UserRole::User)
    }

    #[inline]
    pub const fn is_moderator(&self) -> bool {
        matches!(self, UserRole::Moderator)
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn from_code(code: &str) -> Result<Self, RoleParseError> {
        use UserRole::*;
        match code {
            "user" => Ok(User),
            "moderator" => Ok(Moderator),
            "admin" => Ok(Admin),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_user() {
        assert_eq!(UserRole::default(), UserRole::User);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(UserRole::from_code("user"), Ok(UserRole::User));
        assert_eq!(UserRole::from_code("moderator"), Ok(UserRole::Moderator));
        assert_eq!(UserRole::from_code("admin"), Ok(UserRole::Admin));
        assert!(UserRole::from_code("superuser").is_err());
        assert!(UserRole::from_code("").is_err());
    }

    #[test]
    fn test_capability_queries() {
        assert!(UserRole::User.is_user());
        assert!(!UserRole::User.is_moderator());
        assert!(!UserRole::User.is_admin());

        assert!(UserRole::Moderator.is_moderator());
        assert!(!UserRole::Moderator.is_admin());
        assert!(!UserRole::Moderator.is_user());

        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Admin.is_moderator());
        assert!(!UserRole::Admin.is_user());
    }

    #[test]
    fn test_display() {
        assert_eq!(UserRole::User.to_string(), "user");
        assert_eq!(UserRole::Moderator.to_string(), "moderator");
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_serde() {
        assert_eq!(
            serde_json::to_string(&UserRole::Moderator).unwrap(),
            "\"moderator\""
        );
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }
}
