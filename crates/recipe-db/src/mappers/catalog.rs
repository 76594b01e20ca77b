//! Tag and ingredient entity <-> model mappers

use recipe_core::entities::{Ingredient, Tag};
use recipe_core::error::DomainError;
use recipe_core::value_objects::{HexColor, Id, Slug};

use crate::models::{IngredientModel, TagModel};

/// Convert TagModel to Tag entity
///
/// Fails only if a row was written around the application with a malformed
/// color or slug.
impl TryFrom<TagModel> for Tag {
    type Error = DomainError;

    fn try_from(model: TagModel) -> Result<Self, Self::Error> {
        let color = HexColor::parse(&model.color).map_err(|e| {
            DomainError::DatabaseError(format!("tag {} has bad color: {e}", model.id))
        })?;
        let slug = Slug::parse(&model.slug).map_err(|e| {
            DomainError::DatabaseError(format!("tag {} has bad slug: {e}", model.id))
        })?;

        Ok(Tag {
            id: Id::new(model.id),
            name: model.name,
            color,
            slug,
        })
    }
}

/// Convert a batch of tag rows
pub fn tags_from_models(models: Vec<TagModel>) -> Result<Vec<Tag>, DomainError> {
    models.into_iter().map(Tag::try_from).collect()
}

/// Convert IngredientModel to Ingredient entity
impl From<IngredientModel> for Ingredient {
    fn from(model: IngredientModel) -> Self {
        Ingredient {
            id: Id::new(model.id),
            name: model.name,
            measurement_unit: model.measurement_unit,
        }
    }
}
