//! Test fixtures and data generators
//!
//! Provides reusable request and response bodies for integration tests.

use serde::{Deserialize, Serialize};

/// 1x1 transparent PNG as a data URI
pub const PNG_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Unique lowercase hex suffix for test data
///
/// Taken from a fresh UUID so rows never collide across test runs.
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("cook{suffix}@example.com"),
            username: format!("cook_{suffix}"),
            first_name: "Test".to_string(),
            last_name: "Cook".to_string(),
            password: "Kitchen-Pass-42".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub auth_token: String,
}

/// Body of a successful registration
#[derive(Debug, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub email: String,
    pub username: String,
}

/// User object
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

/// Subscription object: a user plus their recipes
#[derive(Debug, Deserialize)]
pub struct SubscriptionResponse {
    pub id: i64,
    pub username: String,
    pub is_subscribed: bool,
    pub recipes: Vec<ShortRecipeResponse>,
    pub recipes_count: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IngredientAmount {
    pub id: i64,
    pub amount: i32,
}

/// Recipe create body
#[derive(Debug, Serialize)]
pub struct CreateRecipeRequest {
    pub ingredients: Vec<IngredientAmount>,
    pub tags: Vec<i64>,
    pub image: String,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
}

impl CreateRecipeRequest {
    pub fn new(name: &str, ingredients: Vec<IngredientAmount>, tags: Vec<i64>) -> Self {
        Self {
            ingredients,
            tags,
            image: PNG_IMAGE.to_string(),
            name: name.to_string(),
            text: "Mix everything and bake.".to_string(),
            cooking_time: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecipeIngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Recipe object
#[derive(Debug, Deserialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

#[derive(Debug, Deserialize)]
pub struct ShortRecipeResponse {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// Paginated envelope
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
