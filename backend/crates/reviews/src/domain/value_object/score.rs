//! Score Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest allowed score
pub const SCORE_MIN: i16 = 1;

/// Highest allowed score
pub const SCORE_MAX: i16 = 10;

/// Error returned for a score outside the allowed range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutOfRange(pub i16);

impl fmt::Display for ScoreOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score must be between {SCORE_MIN} and {SCORE_MAX}, got {}",
            self.0
        )
    }
}

impl std::error::Error for ScoreOutOfRange {}

/// A review score in `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct Score(i16);

impl Score {
    pub fn new(value: i16) -> Result<Self, ScoreOutOfRange> {
        if (SCORE_MIN..=SCORE_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScoreOutOfRange(value))
        }
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: i16) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i16 {
        self.0
    }
}

impl TryFrom<i16> for Score {
    type Error = ScoreOutOfRange;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for i16 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(Score::new(1).is_ok());
        assert!(Score::new(10).is_ok());
        assert_eq!(Score::new(0), Err(ScoreOutOfRange(0)));
        assert_eq!(Score::new(11), Err(ScoreOutOfRange(11)));
        assert_eq!(Score::new(-3), Err(ScoreOutOfRange(-3)));
    }

    #[test]
    fn test_serde() {
        let score: Score = serde_json::from_str("7").unwrap();
        assert_eq!(score.value(), 7);
        assert!(serde_json::from_str::<Score>("11").is_err());
        assert_eq!(serde_json::to_string(&score).unwrap(), "7");
    }
}
