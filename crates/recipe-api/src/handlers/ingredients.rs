//! Ingredient handlers (read-only)

use axum::{
    extract::{Query, State},
    Json,
};
use recipe_service::dto::{IngredientResponse, IngredientSearchQuery};
use recipe_service::IngredientService;

use crate::extractors::IdPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// All ingredients, optionally narrowed by `name`
///
/// GET /api/ingredients
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientSearchQuery>,
) -> ApiResult<Json<Vec<IngredientResponse>>> {
    let service = IngredientService::new(state.service_context());
    let ingredients = service.search(query.name.as_deref()).await?;
    Ok(Json(ingredients))
}

/// GET /api/ingredients/{id}
pub async fn get_ingredient(
    State(state): State<AppState>,
    IdPath(ingredient_id): IdPath,
) -> ApiResult<Json<IngredientResponse>> {
    let service = IngredientService::new(state.service_context());
    let ingredient = service.get_ingredient(ingredient_id).await?;
    Ok(Json(ingredient))
}
