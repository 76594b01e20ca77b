//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use recipe_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness probe covering PostgreSQL and Redis
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();

    let db_healthy = database_reachable(ctx.pool()).await;
    let redis_healthy = ctx.redis_pool().health_check().await.is_ok();

    let response = ReadinessResponse::ready(db_healthy, redis_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        tracing::warn!(db_healthy, redis_healthy, "Readiness check failed");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

async fn database_reachable(pool: &recipe_db::PgPool) -> bool {
    pool.acquire().await.is_ok()
}
