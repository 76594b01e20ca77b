//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use recipe_cache::RedisPool;
use recipe_common::{AppConfig, AppError, ImageStorage, JwtService};
use recipe_db::{
    create_pool, run_migrations, DatabaseConfig, PgFollowRepository, PgIngredientRepository,
    PgRecipeListRepository, PgRecipeRepository, PgTagRepository, PgUserRepository,
};
use recipe_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes, media_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Only the `/api` routes are rate limited; health probes and media are not.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let api = apply_rate_limit(create_router(), &config.rate_limit)?;
    let router = Router::new()
        .merge(api)
        .merge(health_routes())
        .merge(media_routes(&config.storage.upload_dir));
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());

    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(format!("migrations failed: {e}")))?;
    }

    // Redis connections are opened lazily by the pool
    let redis_pool = RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    let shared_redis = Arc::new(redis_pool);
    info!(url = %config.redis.url, "Redis pool created");

    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.token_expiry));

    tokio::fs::create_dir_all(&config.storage.upload_dir)
        .await
        .map_err(|e| AppError::Storage(format!("cannot create {}: {e}", config.storage.upload_dir)))?;
    let image_storage = Arc::new(ImageStorage::new(&config.storage));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .redis_pool(shared_redis)
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .tag_repo(Arc::new(PgTagRepository::new(pool.clone())))
        .ingredient_repo(Arc::new(PgIngredientRepository::new(pool.clone())))
        .recipe_repo(Arc::new(PgRecipeRepository::new(pool.clone())))
        .follow_repo(Arc::new(PgFollowRepository::new(pool.clone())))
        .recipe_list_repo(Arc::new(PgRecipeListRepository::new(pool)))
        .jwt_service(jwt_service)
        .image_storage(image_storage)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("invalid API_HOST/API_PORT: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
