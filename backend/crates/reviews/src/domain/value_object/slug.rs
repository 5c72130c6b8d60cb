//! Slug Value Object
//!
//! URL path identifier for categories and genres.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum slug length
pub const SLUG_MAX_LENGTH: usize = 50;

/// Error returned when slug validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// Slug is empty after trimming
    Empty,

    /// Slug exceeds SLUG_MAX_LENGTH
    TooLong { length: usize, max: usize },

    /// Slug contains a character outside `[-a-zA-Z0-9_]`
    InvalidCharacter { character: char, position: usize },
}

impl fmt::Display for SlugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Slug cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Slug is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter {
                character,
                position,
            } => write!(
                f,
                "Slug contains invalid character '{character}' at position {position}; \
                 only letters, digits, hyphens and underscores are allowed"
            ),
        }
    }
}

impl std::error::Error for SlugError {}

/// Slug value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Create a new slug with validation
    pub fn new(slug: impl Into<String>) -> Result<Self, SlugError> {
        let slug = slug.into().trim().to_string();

        if slug.is_empty() {
            return Err(SlugError::Empty);
        }

        let length = slug.chars().count();
        if length > SLUG_MAX_LENGTH {
            return Err(SlugError::TooLong {
                length,
                max: SLUG_MAX_LENGTH,
            });
        }

        if let Some((position, character)) = slug
            .chars()
            .enumerate()
            .find(|(_, c)| !Self::is_valid_char(*c))
        {
            return Err(SlugError::InvalidCharacter {
                character,
                position,
            });
        }

        Ok(Self(slug))
    }

    /// ASCII letters, digits, hyphen and underscore only
    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Get the slug as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the slug and return the owned string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, SlugError> {
        Slug::new(s)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_valid() {
        assert!(Slug::new("films").is_ok());
        assert!(Slug::new("sci-fi").is_ok());
        assert!(Slug::new("Genre_2024").is_ok());
        assert!(Slug::new("-_-").is_ok());
    }

    #[test]
    fn test_slug_invalid() {
        assert_eq!(Slug::new(""), Err(SlugError::Empty));
        assert_eq!(Slug::new("   "), Err(SlugError::Empty));
        assert!(matches!(
            Slug::new("sci fi"),
            Err(SlugError::InvalidCharacter {
                character: ' ',
                position: 3
            })
        ));
        assert!(matches!(
            Slug::new("кино"),
            Err(SlugError::InvalidCharacter { .. })
        ));
        assert!(matches!(
            Slug::new("a.b"),
            Err(SlugError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_slug_length_limit() {
        assert!(Slug::new("a".repeat(50)).is_ok());
        assert!(matches!(
            Slug::new("a".repeat(51)),
            Err(SlugError::TooLong { length: 51, max: 50 })
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let slug = Slug::new("sci-fi").unwrap();
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"sci-fi\"");
        let back: Slug = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slug);

        assert!(serde_json::from_str::<Slug>("\"bad slug\"").is_err());
    }
}
