//! Category Entity

use kernel::id::CategoryId;

use crate::domain::value_object::Slug;

/// Category reference data (e.g. "Films", "Books")
///
/// A title belongs to at most one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub category_id: CategoryId,
    /// Display name
    pub name: String,
    /// Unique URL identifier
    pub slug: Slug,
}

impl Category {
    pub fn new(name: String, slug: Slug) -> Self {
        Self {
            category_id: CategoryId::new(),
            name,
            slug,
        }
    }
}
