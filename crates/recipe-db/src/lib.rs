//! # recipe-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `recipe-core`. It handles:
//!
//! - Connection pool management and SQL migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including shopping cart aggregation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use recipe_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use recipe_db::repositories::PgRecipeListRepository;
//! use recipe_core::traits::RecipeListRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!
//!     let lists = PgRecipeListRepository::new(pool);
//!     let totals = lists.shopping_cart_totals(user_id).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, migrator, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgFollowRepository, PgIngredientRepository, PgRecipeListRepository, PgRecipeRepository,
    PgTagRepository, PgUserRepository,
};
