//! # recipe-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, Authenticated, IngredientService, RecipeListService, RecipeService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, ShoppingListService,
    SubscriptionService, TagService, UserService,
};
