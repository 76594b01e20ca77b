//! Domain entities - core business objects

mod ingredient;
mod recipe;
mod relation;
mod tag;
mod user;

pub use ingredient::{Ingredient, NewIngredient};
pub use recipe::{
    IngredientAmount, NewRecipe, Recipe, RecipeChanges, RecipeIngredient, RECIPE_NAME_MAX_LEN,
};
pub use relation::{Follow, RecipeList};
pub use tag::{NewTag, Tag};
pub use user::{NewUser, User};
