//! User handlers
//!
//! Registration, profiles, password changes and subscriptions.

use axum::{
    extract::{Query, State},
    Json,
};
use recipe_service::dto::{
    PaginatedResponse, RecipesLimitQuery, RegisterRequest, RegisteredUserResponse,
    SetPasswordRequest, SubscriptionResponse, UserResponse,
};
use recipe_service::{SubscriptionService, UserService};

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new account
///
/// POST /api/users
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<RegisteredUserResponse>>> {
    let service = UserService::new(state.service_context());
    let user = service.register(request).await?;
    Ok(Created(Json(user)))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let page = service.list_users(auth.user_id(), pagination.request).await?;
    pagination.respond(page)
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.get_user(auth.user_id(), user_id).await?;
    Ok(Json(user))
}

/// GET /api/users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.get_current_user(auth.user_id).await?;
    Ok(Json(user))
}

/// POST /api/users/set_password
pub async fn set_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SetPasswordRequest>,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.set_password(auth.user_id, request).await?;
    Ok(NoContent)
}

/// Authors the current user follows
///
/// GET /api/users/subscriptions
pub async fn list_subscriptions(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
    Query(limit): Query<RecipesLimitQuery>,
) -> ApiResult<Json<PaginatedResponse<SubscriptionResponse>>> {
    let service = SubscriptionService::new(state.service_context());
    let page = service
        .list_subscriptions(auth.user_id, pagination.request, limit.recipes_limit)
        .await?;
    pagination.respond(page)
}

/// POST /api/users/{id}/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(author_id): IdPath,
    Query(limit): Query<RecipesLimitQuery>,
) -> ApiResult<Created<Json<SubscriptionResponse>>> {
    let service = SubscriptionService::new(state.service_context());
    let subscription = service
        .subscribe(auth.user_id, author_id, limit.recipes_limit)
        .await?;
    Ok(Created(Json(subscription)))
}

/// DELETE /api/users/{id}/subscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(author_id): IdPath,
) -> ApiResult<NoContent> {
    let service = SubscriptionService::new(state.service_context());
    service.unsubscribe(auth.user_id, author_id).await?;
    Ok(NoContent)
}
