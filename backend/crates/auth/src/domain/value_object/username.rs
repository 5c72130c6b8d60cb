//! Username Value Object
//!
//! Public handle identifying a user: login, display, and the path segment
//! of `/users/{username}/`.
//!
//! # Invariants
//! - Non-empty after trimming
//! - At most 150 characters
//! - Only word characters (letters, digits, `_`) plus `.`, `@`, `+`, `-`
//! - Not the reserved value `me` (taken by the self-service endpoint)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 150;

/// The reserved username claimed by the `/users/me/` endpoint
pub const RESERVED_USERNAME: &str = "me";

/// Error returned when username validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// Username is empty after trimming
    Empty,

    /// Username is too long (maximum: USERNAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// Username contains a character outside `[\w.@+-]`
    InvalidCharacter { char: char, position: usize },

    /// Username is the reserved value `me`
    Reserved,
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only letters, digits, and . @ + - _ are allowed"
                )
            }
            Self::Reserved => write!(f, "Username \"me\" is reserved"),
        }
    }
}

impl std::error::Error for UsernameError {}

/// Validated username
///
/// Case is preserved; uniqueness is enforced case-sensitively by the
/// storage layer, matching the `username` unique constraint.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new Username from raw input
    ///
    /// Trims surrounding whitespace and validates.
    pub fn new(input: impl AsRef<str>) -> Result<Self, UsernameError> {
        let trimmed = input.as_ref().trim().to_string();
        Self::validate(&trimmed)?;
        Ok(Self(trimmed))
    }

    /// Get the username as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    fn validate(name: &str) -> Result<(), UsernameError> {
        if name.is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = name.chars().count();
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_MAX_LENGTH,
            });
        }

        for (pos, ch) in name.chars().enumerate() {
            if !Self::is_valid_char(ch) {
                return Err(UsernameError::InvalidCharacter {
                    char: ch,
                    position: pos,
                });
            }
        }

        if name == RESERVED_USERNAME {
            return Err(UsernameError::Reserved);
        }

        Ok(())
    }

    /// Check if character matches the `[\w.@+-]` class
    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-')
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Username").field(&self.0).finish()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Username {
    type Error = UsernameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(Username::new("alice").is_ok());
        assert!(Username::new("Alice_42").is_ok());
        assert!(Username::new("alice.bob").is_ok());
        assert!(Username::new("alice@example").is_ok());
        assert!(Username::new("alice+tag").is_ok());
        assert!(Username::new("alice-bob").is_ok());
    }

    #[test]
    fn test_case_is_preserved() {
        let name = Username::new("Alice").unwrap();
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn test_trims_whitespace() {
        let name = Username::new("  alice  ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_empty_fails() {
        assert_eq!(Username::new(""), Err(UsernameError::Empty));
        assert_eq!(Username::new("   "), Err(UsernameError::Empty));
    }

    #[test]
    fn test_too_long() {
        let input = "a".repeat(USERNAME_MAX_LENGTH);
        assert!(Username::new(&input).is_ok());

        let input = "a".repeat(USERNAME_MAX_LENGTH + 1);
        assert!(matches!(
            Username::new(&input),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(matches!(
            Username::new("alice!"),
            Err(UsernameError::InvalidCharacter { char: '!', .. })
        ));
        assert!(matches!(
            Username::new("alice bob"),
            Err(UsernameError::InvalidCharacter { char: ' ', .. })
        ));
        assert!(matches!(
            Username::new("alice/bob"),
            Err(UsernameError::InvalidCharacter { char: '/', .. })
        ));
    }

    #[test]
    fn test_reserved_me() {
        assert_eq!(Username::new("me"), Err(UsernameError::Reserved));
        // Only the exact value is reserved
        assert!(Username::new("me2").is_ok());
        assert!(Username::new("Me").is_ok());
    }

    #[test]
    fn test_serde_roundtrip() {
        let name = Username::new("alice").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"alice\"");

        let back: Username = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn test_deserialize_reserved_fails() {
        let result: Result<Username, _> = serde_json::from_str("\"me\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_error_display() {
        let err = UsernameError::Reserved;
        assert!(err.to_string().contains("reserved"));

        let err = UsernameError::TooLong {
            length: 151,
            max: 150,
        };
        assert!(err.to_string().contains("151"));
    }
}
