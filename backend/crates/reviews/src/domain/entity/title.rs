//! Title Entity

use kernel::id::{CategoryId, GenreId, TitleId};

use crate::domain::entity::{Category, Genre};
use crate::domain::value_object::Year;

/// A rateable work, hydrated for reads
///
/// `rating` is never stored; it is the live mean of the title's review
/// scores, computed at query time, and absent while the title has no
/// reviews.
#[derive(Debug, Clone)]
pub struct Title {
    pub title_id: TitleId,
    pub name: String,
    pub year: Year,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub genres: Vec<Genre>,
    pub rating: Option<f64>,
}

/// Write model for creating or replacing a title's stored fields
///
/// Category and genres are referenced by id; slug resolution happens in
/// the application layer so unknown slugs fail with field-keyed errors
/// before any write.
#[derive(Debug, Clone)]
pub struct TitleRecord {
    pub title_id: TitleId,
    pub name: String,
    pub year: Year,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub genre_ids: Vec<GenreId>,
}
