//! Tag handlers (read-only)

use axum::{extract::State, Json};
use recipe_service::dto::TagResponse;
use recipe_service::TagService;

use crate::extractors::IdPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<TagResponse>>> {
    let tags = TagService::new(state.service_context()).list_tags().await?;
    Ok(Json(tags))
}

/// GET /api/tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    IdPath(tag_id): IdPath,
) -> ApiResult<Json<TagResponse>> {
    let tag = TagService::new(state.service_context()).get_tag(tag_id).await?;
    Ok(Json(tag))
}
