//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers::{auth, health, ingredients, recipes, tags, users};
use crate::state::AppState;

/// Create the API router (health and media are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Stored recipe images under `/media`
pub fn media_routes(upload_dir: &str) -> Router<AppState> {
    Router::new().nest_service("/media", ServeDir::new(upload_dir))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(catalog_routes())
        .merge(recipe_routes())
}

/// Token authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/token/login", post(auth::login))
        .route("/auth/token/logout", post(auth::logout))
}

/// User and subscription routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::register))
        .route("/users/me", get(users::get_current_user))
        .route("/users/set_password", post(users::set_password))
        .route("/users/subscriptions", get(users::list_subscriptions))
        .route("/users/:id", get(users::get_user))
        .route(
            "/users/:id/subscribe",
            post(users::subscribe).delete(users::unsubscribe),
        )
}

/// Read-only tag and ingredient routes
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(tags::list_tags))
        .route("/tags/:id", get(tags::get_tag))
        .route("/ingredients", get(ingredients::list_ingredients))
        .route("/ingredients/:id", get(ingredients::get_ingredient))
}

/// Recipe, favorite and shopping cart routes
fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/recipes/download_shopping_cart",
            get(recipes::download_shopping_cart),
        )
        .route(
            "/recipes/:id",
            get(recipes::get_recipe)
                .patch(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route(
            "/recipes/:id/favorite",
            post(recipes::add_favorite).delete(recipes::remove_favorite),
        )
        .route(
            "/recipes/:id/shopping_cart",
            post(recipes::add_to_shopping_cart).delete(recipes::remove_from_shopping_cart),
        )
}
