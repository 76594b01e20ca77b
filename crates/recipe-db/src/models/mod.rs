//! Database models - SQLx-compatible structs for PostgreSQL tables

mod catalog;
mod recipe;
mod user;

pub use catalog::{IngredientModel, TagModel};
pub use recipe::{IngredientTotalModel, RecipeIngredientModel, RecipeModel};
pub use user::UserModel;
