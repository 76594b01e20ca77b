//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in recipe-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod follow;
mod ingredient;
mod recipe;
mod recipe_list;
mod tag;
mod user;

pub use follow::PgFollowRepository;
pub use ingredient::PgIngredientRepository;
pub use recipe::PgRecipeRepository;
pub use recipe_list::PgRecipeListRepository;
pub use tag::PgTagRepository;
pub use user::PgUserRepository;
