//! Tag and ingredient database models

use sqlx::FromRow;

/// Database model for tags table
#[derive(Debug, Clone, FromRow)]
pub struct TagModel {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Database model for ingredients table
#[derive(Debug, Clone, FromRow)]
pub struct IngredientModel {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}
