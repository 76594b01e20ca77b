//! User relations - follows and per-user recipe lists (favorites, cart)

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Id;

/// A directed subscription from `user_id` to `author_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    pub user_id: Id,
    pub author_id: Id,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    /// Create a follow, rejecting self-subscription
    pub fn new(user_id: Id, author_id: Id) -> Result<Self, DomainError> {
        if user_id == author_id {
            return Err(DomainError::CannotSubscribeToSelf);
        }
        Ok(Self {
            user_id,
            author_id,
            created_at: Utc::now(),
        })
    }
}

/// A per-user set of recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeList {
    Favorites,
    ShoppingCart,
}

impl RecipeList {
    /// Short name used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::ShoppingCart => "shopping_cart",
        }
    }

    /// Error for adding a recipe that is already on the list
    pub fn already_present(self, recipe_id: Id) -> DomainError {
        match self {
            Self::Favorites => DomainError::AlreadyInFavorites(recipe_id),
            Self::ShoppingCart => DomainError::AlreadyInShoppingCart(recipe_id),
        }
    }

    /// Error for removing a recipe that is not on the list
    pub fn not_present(self, recipe_id: Id) -> DomainError {
        match self {
            Self::Favorites => DomainError::NotInFavorites(recipe_id),
            Self::ShoppingCart => DomainError::NotInShoppingCart(recipe_id),
        }
    }
}
