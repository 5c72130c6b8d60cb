//! Value Object Module

pub mod score;
pub mod slug;
pub mod year;

pub use score::{Score, ScoreOutOfRange};
pub use slug::{Slug, SlugError};
pub use year::{Year, YearError};
