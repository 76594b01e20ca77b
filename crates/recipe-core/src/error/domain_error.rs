//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Id;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Id),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(Id),

    #[error("Tag not found: {0}")]
    TagNotFound(Id),

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(Id),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Cooking time must be at least 1 minute, got {0}")]
    InvalidCookingTime(i32),

    #[error("Amount of ingredient {ingredient_id} must be at least 1, got {amount}")]
    InvalidAmount { ingredient_id: Id, amount: i32 },

    #[error("Ingredient {0} is listed more than once")]
    DuplicateIngredient(Id),

    #[error("Tag {0} is listed more than once")]
    DuplicateTag(Id),

    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(Id),

    #[error("Unknown tag: {0}")]
    UnknownTag(Id),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not recipe author")]
    NotRecipeAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Tag already exists")]
    TagAlreadyExists,

    #[error("Ingredient already exists")]
    IngredientAlreadyExists,

    #[error("Already subscribed to user {0}")]
    AlreadySubscribed(Id),

    #[error("Recipe {0} is already in favorites")]
    AlreadyInFavorites(Id),

    #[error("Recipe {0} is already in the shopping cart")]
    AlreadyInShoppingCart(Id),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot subscribe to yourself")]
    CannotSubscribeToSelf,

    #[error("Not subscribed to user {0}")]
    NotSubscribed(Id),

    #[error("Recipe {0} is not in favorites")]
    NotInFavorites(Id),

    #[error("Recipe {0} is not in the shopping cart")]
    NotInShoppingCart(Id),

    #[error("Current password is incorrect")]
    IncorrectPassword,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RecipeNotFound(_) => "UNKNOWN_RECIPE",
            Self::TagNotFound(_) => "UNKNOWN_TAG",
            Self::IngredientNotFound(_) => "UNKNOWN_INGREDIENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidCookingTime(_) => "INVALID_COOKING_TIME",
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::DuplicateIngredient(_) => "DUPLICATE_INGREDIENT",
            Self::DuplicateTag(_) => "DUPLICATE_TAG",
            Self::UnknownIngredient(_) => "UNKNOWN_INGREDIENT_REFERENCE",
            Self::UnknownTag(_) => "UNKNOWN_TAG_REFERENCE",

            // Authorization
            Self::NotRecipeAuthor => "NOT_RECIPE_AUTHOR",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::IngredientAlreadyExists => "INGREDIENT_ALREADY_EXISTS",
            Self::AlreadySubscribed(_) => "ALREADY_SUBSCRIBED",
            Self::AlreadyInFavorites(_) => "ALREADY_IN_FAVORITES",
            Self::AlreadyInShoppingCart(_) => "ALREADY_IN_SHOPPING_CART",

            // Business Rules
            Self::CannotSubscribeToSelf => "CANNOT_SUBSCRIBE_TO_SELF",
            Self::NotSubscribed(_) => "NOT_SUBSCRIBED",
            Self::NotInFavorites(_) => "NOT_IN_FAVORITES",
            Self::NotInShoppingCart(_) => "NOT_IN_SHOPPING_CART",
            Self::IncorrectPassword => "INCORRECT_PASSWORD",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::RecipeNotFound(_)
                | Self::TagNotFound(_)
                | Self::IngredientNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
                | Self::ContentTooLong { .. }
                | Self::InvalidCookingTime(_)
                | Self::InvalidAmount { .. }
                | Self::DuplicateIngredient(_)
                | Self::DuplicateTag(_)
                | Self::UnknownIngredient(_)
                | Self::UnknownTag(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotRecipeAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::UsernameAlreadyExists
                | Self::TagAlreadyExists
                | Self::IngredientAlreadyExists
                | Self::AlreadySubscribed(_)
                | Self::AlreadyInFavorites(_)
                | Self::AlreadyInShoppingCart(_)
        )
    }

    /// Check if this is a business rule violation
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            Self::CannotSubscribeToSelf
                | Self::NotSubscribed(_)
                | Self::NotInFavorites(_)
                | Self::NotInShoppingCart(_)
                | Self::IncorrectPassword
        )
    }
}
