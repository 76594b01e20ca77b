//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateRecipeRequest, IngredientSearchQuery, LoginRequest, RecipeIngredientRequest,
    RecipeListQuery, RecipesLimitQuery, RegisterRequest, SetPasswordRequest, UpdateRecipeRequest,
};

// Re-export commonly used response types
pub use responses::{
    HealthChecks, HealthResponse, IngredientResponse, PaginatedResponse, ReadinessResponse,
    RecipeIngredientResponse, RecipeResponse, RegisteredUserResponse, ShoppingListFile,
    ShortRecipeResponse, SubscriptionResponse, TagResponse, TokenResponse, UserResponse,
};
