//! Entity to model mappers
//!
//! Conversions between domain entities (recipe-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - column helpers: Prepare entity data for array binds

mod catalog;
mod recipe;
mod user;

pub use catalog::tags_from_models;
pub use recipe::{ingredient_columns, raw_ids};
