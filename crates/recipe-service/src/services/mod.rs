//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod context;
pub mod error;
pub mod ingredient;
pub mod recipe;
pub mod recipe_list;
pub mod shopping_list;
pub mod subscription;
pub mod tag;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use auth::{AuthService, Authenticated};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use ingredient::IngredientService;
pub use recipe::RecipeService;
pub use recipe_list::RecipeListService;
pub use shopping_list::ShoppingListService;
pub use subscription::SubscriptionService;
pub use tag::TagService;
pub use user::UserService;
