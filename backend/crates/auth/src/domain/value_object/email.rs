//! Email Value Object
//!
//! Represents a validated email address.
//! Basic validation only - proof of ownership comes from the confirmation
//! code delivered to the address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum email length (per RFC 5321)
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Error returned when email validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// Email is empty after trimming
    Empty,

    /// Email exceeds EMAIL_MAX_LENGTH
    TooLong { length: usize, max: usize },

    /// Email does not look like `local@domain.tld`
    InvalidFormat,
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Email cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Email is too long ({length} chars, maximum {max})")
            }
            Self::InvalidFormat => write!(f, "Invalid email format"),
        }
    }
}

impl std::error::Error for EmailError {}

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    ///
    /// Lowercases the address; uniqueness checks compare the lowered form.
    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        let length = email.chars().count();
        if length > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong {
                length,
                max: EMAIL_MAX_LENGTH,
            });
        }

        if !Self::is_valid_format(&email) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(email))
    }

    /// Basic email format validation
    fn is_valid_format(email: &str) -> bool {
        // Must contain exactly one @
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if domain.contains('@') {
            return false;
        }

        // Local part checks
        if local.is_empty() || local.len() > 64 {
            return false;
        }

        // Domain checks
        if domain.is_empty() || !domain.contains('.') {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }
        if domain.starts_with('.') || domain.ends_with('.') {
            return false;
        }
        if domain.starts_with('-') || domain.ends_with('-') {
            return false;
        }

        true
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the domain part of the email
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, EmailError> {
        Email::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("User@Example.COM").is_ok()); // Should lowercase
        assert!(Email::new("user.name@example.co.jp").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert_eq!(Email::new(""), Err(EmailError::Empty));
        assert_eq!(Email::new("userexample.com"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("user@"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("@example.com"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("user@@example.com"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("user@example"), Err(EmailError::InvalidFormat));
    }

    #[test]
    fn test_email_too_long() {
        let local = "a".repeat(64);
        let domain = "b".repeat(200);
        let email = format!("{local}@{domain}.com");
        assert!(matches!(
            Email::new(email),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_email_case_normalization() {
        let email = Email::new("User@Example.COM").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_email_domain() {
        let email = Email::new("user@example.com").unwrap();
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_serde_roundtrip() {
        let email = Email::new("user@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"user@example.com\"");

        let back: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(back, email);
    }
}
