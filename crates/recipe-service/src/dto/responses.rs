//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Ids are plain JSON integers.

use chrono::{DateTime, Utc};
use recipe_core::Id;
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Page-number paginated response
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// Total number of items across all pages
    pub count: i64,
    /// Relative URL of the next page
    pub next: Option<String>,
    /// Relative URL of the previous page
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn new(
        results: Vec<T>,
        count: i64,
        next: Option<String>,
        previous: Option<String>,
    ) -> Self {
        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Token login response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub auth_token: String,
}

// ============================================================================
// User Responses
// ============================================================================

/// Body returned by registration
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredUserResponse {
    pub email: String,
    pub id: Id,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// User as seen by the requester
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub id: Id,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the requester follows this user
    pub is_subscribed: bool,
}

/// Followed author with a preview of their recipes
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<ShortRecipeResponse>,
    pub recipes_count: i64,
}

// ============================================================================
// Catalog Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub id: Id,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngredientResponse {
    pub id: Id,
    pub name: String,
    pub measurement_unit: String,
}

// ============================================================================
// Recipe Responses
// ============================================================================

/// Ingredient line of a recipe
#[derive(Debug, Clone, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: Id,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Full recipe as seen by the requester
#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
    pub id: Id,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    /// Public image URL
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub pub_date: DateTime<Utc>,
}

/// Compact recipe used by favorites, cart and subscriptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortRecipeResponse {
    pub id: Id,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// Rendered shopping list ready for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListFile {
    pub filename: &'static str,
    pub content: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
