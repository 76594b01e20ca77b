//! Recipe database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for recipes table
#[derive(Debug, Clone, FromRow)]
pub struct RecipeModel {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub pub_date: DateTime<Utc>,
}

/// An ingredient row joined with its amount in one recipe
#[derive(Debug, Clone, FromRow)]
pub struct RecipeIngredientModel {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Summed amount of one ingredient across a cart
#[derive(Debug, Clone, FromRow)]
pub struct IngredientTotalModel {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}
