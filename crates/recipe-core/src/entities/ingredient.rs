//! Ingredient entity - a product with its measurement unit

use crate::value_objects::Id;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ingredient {
    pub id: Id,
    pub name: String,
    pub measurement_unit: String,
}

/// Data required to insert an ingredient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

impl Ingredient {
    /// Relevance of this ingredient for a search term
    ///
    /// `Some(0)` for a case-insensitive prefix match, `Some(1)` for a match
    /// anywhere else in the name, `None` when the name does not contain the
    /// term at all.
    pub fn search_rank(&self, term: &str) -> Option<u8> {
        let name = self.name.to_lowercase();
        let term = term.to_lowercase();
        if name.starts_with(&term) {
            Some(0)
        } else if name.contains(&term) {
            Some(1)
        } else {
            None
        }
    }
}
