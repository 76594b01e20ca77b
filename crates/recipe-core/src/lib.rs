//! # recipe-core
//!
//! Domain layer containing entities, value objects, repository traits and
//! shopping list aggregation.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod shopping_list;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Follow, Ingredient, IngredientAmount, NewIngredient, NewRecipe, NewTag, NewUser, Recipe,
    RecipeChanges, RecipeIngredient, RecipeList, Tag, User,
};
pub use error::DomainError;
pub use shopping_list::{IngredientTotal, ShoppingList, SHOPPING_LIST_FILENAME};
pub use traits::{
    FollowRepository, IngredientRepository, Page, PageRequest, RecipeFilter,
    RecipeListRepository, RecipeRepository, RepoResult, TagRepository, UserRepository,
};
pub use value_objects::{HexColor, HexColorError, Id, IdParseError, Slug, SlugError};
