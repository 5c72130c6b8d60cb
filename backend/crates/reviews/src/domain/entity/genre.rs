//! Genre Entity

use kernel::id::GenreId;

use crate::domain::value_object::Slug;

/// Genre reference data (e.g. "Drama", "Sci-fi")
///
/// A title may carry any number of genres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub genre_id: GenreId,
    /// Display name
    pub name: String,
    /// Unique URL identifier
    pub slug: Slug,
}

impl Genre {
    pub fn new(name: String, slug: Slug) -> Self {
        Self {
            genre_id: GenreId::new(),
            name,
            slug,
        }
    }
}
