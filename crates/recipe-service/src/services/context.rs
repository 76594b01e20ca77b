//! Service context - dependency container for services
//!
//! Holds all repositories, the auth-session store, the JWT service and
//! image storage needed by services.

use std::sync::Arc;

use recipe_cache::{AuthSessionStore, SharedRedisPool};
use recipe_common::auth::JwtService;
use recipe_common::{AppError, ImageStorage};
use recipe_core::traits::{
    FollowRepository, IngredientRepository, RecipeListRepository, RecipeRepository,
    TagRepository, UserRepository,
};
use recipe_db::PgPool;

use super::error::ServiceResult;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The Redis-backed auth-session store
/// - JWT service for authentication
/// - Recipe image storage
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    tag_repo: Arc<dyn TagRepository>,
    ingredient_repo: Arc<dyn IngredientRepository>,
    recipe_repo: Arc<dyn RecipeRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    recipe_list_repo: Arc<dyn RecipeListRepository>,

    // Cache stores
    session_store: AuthSessionStore,

    // Services
    jwt_service: Arc<JwtService>,
    image_storage: Arc<ImageStorage>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        user_repo: Arc<dyn UserRepository>,
        tag_repo: Arc<dyn TagRepository>,
        ingredient_repo: Arc<dyn IngredientRepository>,
        recipe_repo: Arc<dyn RecipeRepository>,
        follow_repo: Arc<dyn FollowRepository>,
        recipe_list_repo: Arc<dyn RecipeListRepository>,
        jwt_service: Arc<JwtService>,
        image_storage: Arc<ImageStorage>,
    ) -> Self {
        // Sessions live exactly as long as the tokens that reference them
        let ttl = u64::try_from(jwt_service.token_expiry()).unwrap_or(0).max(1);
        let session_store = AuthSessionStore::with_ttl((*redis_pool).clone(), ttl);

        Self {
            pool,
            redis_pool,
            user_repo,
            tag_repo,
            ingredient_repo,
            recipe_repo,
            follow_repo,
            recipe_list_repo,
            session_store,
            jwt_service,
            image_storage,
        }
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the tag repository
    pub fn tag_repo(&self) -> &dyn TagRepository {
        self.tag_repo.as_ref()
    }

    /// Get the ingredient repository
    pub fn ingredient_repo(&self) -> &dyn IngredientRepository {
        self.ingredient_repo.as_ref()
    }

    /// Get the recipe repository
    pub fn recipe_repo(&self) -> &dyn RecipeRepository {
        self.recipe_repo.as_ref()
    }

    /// Get the follow repository
    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    /// Get the favorites / shopping cart repository
    pub fn recipe_list_repo(&self) -> &dyn RecipeListRepository {
        self.recipe_list_repo.as_ref()
    }

    // === Cache Stores ===

    /// Get the auth session store
    pub fn session_store(&self) -> &AuthSessionStore {
        &self.session_store
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the recipe image storage
    pub fn image_storage(&self) -> &ImageStorage {
        self.image_storage.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("image_root", &self.image_storage.root())
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    tag_repo: Option<Arc<dyn TagRepository>>,
    ingredient_repo: Option<Arc<dyn IngredientRepository>>,
    recipe_repo: Option<Arc<dyn RecipeRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    recipe_list_repo: Option<Arc<dyn RecipeListRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    image_storage: Option<Arc<ImageStorage>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn tag_repo(mut self, repo: Arc<dyn TagRepository>) -> Self {
        self.tag_repo = Some(repo);
        self
    }

    pub fn ingredient_repo(mut self, repo: Arc<dyn IngredientRepository>) -> Self {
        self.ingredient_repo = Some(repo);
        self
    }

    pub fn recipe_repo(mut self, repo: Arc<dyn RecipeRepository>) -> Self {
        self.recipe_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn recipe_list_repo(mut self, repo: Arc<dyn RecipeListRepository>) -> Self {
        self.recipe_list_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn image_storage(mut self, storage: Arc<ImageStorage>) -> Self {
        self.image_storage = Some(storage);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns a `Config` error naming the first missing dependency
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| AppError::Config(format!("{name} is required")).into())
        }

        Ok(ServiceContext::new(
            required(self.pool, "pool")?,
            required(self.redis_pool, "redis_pool")?,
            required(self.user_repo, "user_repo")?,
            required(self.tag_repo, "tag_repo")?,
            required(self.ingredient_repo, "ingredient_repo")?,
            required(self.recipe_repo, "recipe_repo")?,
            required(self.follow_repo, "follow_repo")?,
            required(self.recipe_list_repo, "recipe_list_repo")?,
            required(self.jwt_service, "jwt_service")?,
            required(self.image_storage, "image_storage")?,
        ))
    }
}
