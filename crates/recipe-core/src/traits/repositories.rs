//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Follow, Ingredient, NewIngredient, NewRecipe, NewTag, NewUser, Recipe, RecipeChanges,
    RecipeIngredient, RecipeList, Tag, User,
};
use crate::error::DomainError;
use crate::shopping_list::IngredientTotal;
use crate::value_objects::Id;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Pagination
// ============================================================================

/// Page-number pagination; `page` is 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 6;
    pub const MAX_LIMIT: u32 = 100;

    /// Build a request, clamping the limit and flooring the page at 1
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the size of the whole collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user and return the stored row
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// List users ordered by id
    async fn list(&self, page: PageRequest) -> RepoResult<Page<User>>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Id) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Id, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Tag Repository
// ============================================================================

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Find tag by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Tag>>;

    /// All tags ordered by name
    async fn list_all(&self) -> RepoResult<Vec<Tag>>;

    /// Tags among `ids` that exist
    async fn find_by_ids(&self, ids: &[Id]) -> RepoResult<Vec<Tag>>;

    /// Create a new tag
    async fn create(&self, tag: &NewTag) -> RepoResult<Tag>;
}

// ============================================================================
// Ingredient Repository
// ============================================================================

#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Find ingredient by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Ingredient>>;

    /// Search by name; prefix matches first, then other substring matches
    async fn search(&self, name: Option<&str>) -> RepoResult<Vec<Ingredient>>;

    /// Ingredients among `ids` that exist
    async fn find_by_ids(&self, ids: &[Id]) -> RepoResult<Vec<Ingredient>>;

    /// Create a new ingredient
    async fn create(&self, ingredient: &NewIngredient) -> RepoResult<Ingredient>;
}

// ============================================================================
// Recipe Repository
// ============================================================================

/// Filters for recipe listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author_id: Option<Id>,
    /// Match recipes carrying any of these tag slugs
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<Id>,
    pub in_cart_of: Option<Id>,
}

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Find recipe by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Recipe>>;

    /// List recipes newest first
    async fn list(&self, filter: &RecipeFilter, page: PageRequest) -> RepoResult<Page<Recipe>>;

    /// Insert the recipe with its ingredient and tag rows
    async fn create(&self, recipe: &NewRecipe) -> RepoResult<Recipe>;

    /// Apply a partial update, replacing ingredient/tag sets when present
    async fn update(&self, id: Id, changes: &RecipeChanges) -> RepoResult<Recipe>;

    /// Delete the recipe and everything hanging off it
    async fn delete(&self, id: Id) -> RepoResult<()>;

    /// Ingredient lines of a recipe
    async fn ingredients_for(&self, recipe_id: Id) -> RepoResult<Vec<RecipeIngredient>>;

    /// Tags of a recipe
    async fn tags_for(&self, recipe_id: Id) -> RepoResult<Vec<Tag>>;

    /// Newest recipes of an author, optionally capped
    async fn find_by_author(&self, author_id: Id, limit: Option<i64>) -> RepoResult<Vec<Recipe>>;

    /// Number of recipes an author has published
    async fn count_by_author(&self, author_id: Id) -> RepoResult<i64>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Check whether `user_id` follows `author_id`
    async fn exists(&self, user_id: Id, author_id: Id) -> RepoResult<bool>;

    /// Store a follow; a duplicate maps to `AlreadySubscribed`
    async fn create(&self, follow: &Follow) -> RepoResult<()>;

    /// Remove a follow; returns whether a row was deleted
    async fn delete(&self, user_id: Id, author_id: Id) -> RepoResult<bool>;

    /// Authors followed by a user, ordered by id
    async fn list_authors(&self, user_id: Id, page: PageRequest) -> RepoResult<Page<User>>;
}

// ============================================================================
// Recipe List Repository (favorites, shopping cart)
// ============================================================================

#[async_trait]
pub trait RecipeListRepository: Send + Sync {
    /// Check whether the recipe is on the user's list
    async fn contains(&self, list: RecipeList, user_id: Id, recipe_id: Id) -> RepoResult<bool>;

    /// Put a recipe on the list; a duplicate maps to the list's "already present" error
    async fn add(&self, list: RecipeList, user_id: Id, recipe_id: Id) -> RepoResult<()>;

    /// Take a recipe off the list; returns whether a row was deleted
    async fn remove(&self, list: RecipeList, user_id: Id, recipe_id: Id) -> RepoResult<bool>;

    /// Summed ingredient amounts over every recipe in the user's cart
    async fn shopping_cart_totals(&self, user_id: Id) -> RepoResult<Vec<IngredientTotal>>;
}
