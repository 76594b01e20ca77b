//! Token authentication handlers

use axum::{extract::State, Json};
use recipe_service::dto::{LoginRequest, TokenResponse};
use recipe_service::AuthService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Exchange credentials for a token
///
/// POST /api/auth/token/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Revoke the session behind the presented token
///
/// POST /api/auth/token/logout
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.logout(auth.user_id, &auth.session_id).await?;
    Ok(NoContent)
}
