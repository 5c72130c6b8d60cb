//! Year Value Object
//!
//! A title's release year. Future years are rejected against the clock
//! at validation time.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned for a year outside the allowed range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearError {
    /// Year is negative
    Negative(i32),

    /// Year is in the future
    InFuture { year: i32, current: i32 },
}

impl fmt::Display for YearError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative(year) => write!(f, "Year cannot be negative, got {year}"),
            Self::InFuture { year, current } => {
                write!(f, "Year {year} is in the future (current year is {current})")
            }
        }
    }
}

impl std::error::Error for YearError {}

/// Release year in `0..=current`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Year(i32);

impl Year {
    pub fn new(value: i32) -> Result<Self, YearError> {
        Self::new_at(value, Utc::now().year())
    }

    /// Validation against an explicit current year, for tests
    pub fn new_at(value: i32, current: i32) -> Result<Self, YearError> {
        if value < 0 {
            return Err(YearError::Negative(value));
        }
        if value > current {
            return Err(YearError::InFuture {
                year: value,
                current,
            });
        }
        Ok(Self(value))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Year {
    type Error = YearError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for i32 {
    fn from(year: Year) -> Self {
        year.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds() {
        assert!(Year::new_at(0, 2024).is_ok());
        assert!(Year::new_at(2024, 2024).is_ok());
        assert_eq!(
            Year::new_at(2025, 2024),
            Err(YearError::InFuture {
                year: 2025,
                current: 2024
            })
        );
        assert_eq!(Year::new_at(-1, 2024), Err(YearError::Negative(-1)));
    }

    #[test]
    fn test_current_year_accepted() {
        let current = Utc::now().year();
        assert!(Year::new(current).is_ok());
        assert!(Year::new(current + 1).is_err());
    }

    #[test]
    fn test_serde() {
        let year: Year = serde_json::from_str("1994").unwrap();
        assert_eq!(year.value(), 1994);
        assert!(serde_json::from_str::<Year>("99999").is_err());
    }
}
