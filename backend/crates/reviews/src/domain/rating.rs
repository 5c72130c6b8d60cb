//! Rating Computation
//!
//! A title's rating is the plain arithmetic mean of its review scores,
//! recomputed at read time. The SQL path uses `AVG(score)`; this is the
//! same computation for in-memory storage and for tests pinning the
//! semantics.

/// Mean of the given scores; `None` when there are none
pub fn mean_score(scores: &[i16]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: i64 = scores.iter().map(|s| i64::from(*s)).sum();
    Some(sum as f64 / scores.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_reviews_means_no_rating() {
        assert_eq!(mean_score(&[]), None);
    }

    #[test]
    fn test_single_review() {
        assert_eq!(mean_score(&[7]), Some(7.0));
    }

    #[test]
    fn test_mean_is_not_rounded() {
        assert_eq!(mean_score(&[7, 9]), Some(8.0));
        assert_eq!(mean_score(&[7, 8]), Some(7.5));
        let rating = mean_score(&[1, 10, 10]).unwrap();
        assert!((rating - 7.0).abs() < 1e-9);
    }
}
