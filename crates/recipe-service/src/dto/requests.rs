//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use recipe_core::entities::IngredientAmount;
use recipe_core::Id;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Usernames are word characters plus `.@+-`
fn validate_username(username: &str) -> Result<(), ValidationError> {
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("username")
            .with_message("Username may contain only letters, digits and @/./+/-/_".into()))
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Token login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        email(message = "Invalid email format"),
        length(max = 254, message = "Email must be at most 254 characters")
    )]
    pub email: String,

    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(length(min = 1, max = 150, message = "First name must be 1-150 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 150, message = "Last name must be 1-150 characters"))]
    pub last_name: String,

    pub password: String,
}

/// Password change request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetPasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    pub new_password: String,
}

// ============================================================================
// Recipe Requests
// ============================================================================

/// One `{id, amount}` entry of a recipe write body
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Validate)]
pub struct RecipeIngredientRequest {
    pub id: Id,

    #[validate(range(min = 1, message = "Amount must be at least 1"))]
    pub amount: i32,
}

impl From<RecipeIngredientRequest> for IngredientAmount {
    fn from(item: RecipeIngredientRequest) -> Self {
        Self {
            ingredient_id: item.id,
            amount: item.amount,
        }
    }
}

/// Create recipe request; every field is required
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    #[validate(
        length(min = 1, message = "At least one ingredient is required"),
        nested
    )]
    pub ingredients: Vec<RecipeIngredientRequest>,

    #[validate(length(min = 1, message = "At least one tag is required"))]
    pub tags: Vec<Id>,

    /// Base64 data URI
    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,

    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,

    #[validate(range(min = 1, message = "Cooking time must be at least 1 minute"))]
    pub cooking_time: i32,
}

/// Partial recipe update; a present list replaces the whole set
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRecipeRequest {
    #[validate(
        length(min = 1, message = "At least one ingredient is required"),
        nested
    )]
    pub ingredients: Option<Vec<RecipeIngredientRequest>>,

    #[validate(length(min = 1, message = "At least one tag is required"))]
    pub tags: Option<Vec<Id>>,

    /// Base64 data URI
    pub image: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Text is required"))]
    pub text: Option<String>,

    #[validate(range(min = 1, message = "Cooking time must be at least 1 minute"))]
    pub cooking_time: Option<i32>,
}

/// Recipe list filters from the query string
///
/// `tags` may repeat. The boolean filters take `1` or `0`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeListQuery {
    pub author: Option<Id>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub is_favorited: Option<u8>,

    pub is_in_shopping_cart: Option<u8>,
}

/// `recipes_limit` for subscription payloads
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RecipesLimitQuery {
    pub recipes_limit: Option<u32>,
}

/// Ingredient search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientSearchQuery {
    pub name: Option<String>,
}
