//! Recipe handlers
//!
//! Recipe CRUD, the favorites and shopping cart lists, and the shopping
//! list download.

use axum::{extract::State, Json};
use axum_extra::extract::Query;
use recipe_core::{Id, RecipeList};
use recipe_service::dto::{
    CreateRecipeRequest, PaginatedResponse, RecipeListQuery, RecipeResponse, ShortRecipeResponse,
    UpdateRecipeRequest,
};
use recipe_service::{RecipeListService, RecipeService, ShoppingListService};

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent, TextAttachment};
use crate::state::AppState;

/// Recipes newest first, with author/tag/list filters
///
/// GET /api/recipes
pub async fn list_recipes(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    pagination: Pagination,
    query: Result<Query<RecipeListQuery>, axum_extra::extract::QueryRejection>,
) -> ApiResult<Json<PaginatedResponse<RecipeResponse>>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.to_string()))?;

    let service = RecipeService::new(state.service_context());
    let page = service
        .list_recipes(auth.user_id(), query, pagination.request)
        .await?;
    pagination.respond(page)
}

/// POST /api/recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateRecipeRequest>,
) -> ApiResult<Created<Json<RecipeResponse>>> {
    let service = RecipeService::new(state.service_context());
    let recipe = service.create_recipe(auth.user_id, request).await?;
    Ok(Created(Json(recipe)))
}

/// GET /api/recipes/{id}
pub async fn get_recipe(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<Json<RecipeResponse>> {
    let service = RecipeService::new(state.service_context());
    let recipe = service.get_recipe(auth.user_id(), recipe_id).await?;
    Ok(Json(recipe))
}

/// PATCH /api/recipes/{id}
pub async fn update_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateRecipeRequest>,
) -> ApiResult<Json<RecipeResponse>> {
    let service = RecipeService::new(state.service_context());
    let recipe = service.update_recipe(auth.user_id, recipe_id, request).await?;
    Ok(Json(recipe))
}

/// DELETE /api/recipes/{id}
pub async fn delete_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<NoContent> {
    let service = RecipeService::new(state.service_context());
    service.delete_recipe(auth.user_id, recipe_id).await?;
    Ok(NoContent)
}

async fn add_to_list(
    state: &AppState,
    list: RecipeList,
    auth: &AuthUser,
    recipe_id: Id,
) -> ApiResult<Created<Json<ShortRecipeResponse>>> {
    let service = RecipeListService::new(state.service_context());
    let recipe = service.add(list, auth.user_id, recipe_id).await?;
    Ok(Created(Json(recipe)))
}

async fn remove_from_list(
    state: &AppState,
    list: RecipeList,
    auth: &AuthUser,
    recipe_id: Id,
) -> ApiResult<NoContent> {
    let service = RecipeListService::new(state.service_context());
    service.remove(list, auth.user_id, recipe_id).await?;
    Ok(NoContent)
}

/// POST /api/recipes/{id}/favorite
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<Created<Json<ShortRecipeResponse>>> {
    add_to_list(&state, RecipeList::Favorites, &auth, recipe_id).await
}

/// DELETE /api/recipes/{id}/favorite
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<NoContent> {
    remove_from_list(&state, RecipeList::Favorites, &auth, recipe_id).await
}

/// POST /api/recipes/{id}/shopping_cart
pub async fn add_to_shopping_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<Created<Json<ShortRecipeResponse>>> {
    add_to_list(&state, RecipeList::ShoppingCart, &auth, recipe_id).await
}

/// DELETE /api/recipes/{id}/shopping_cart
pub async fn remove_from_shopping_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(recipe_id): IdPath,
) -> ApiResult<NoContent> {
    remove_from_list(&state, RecipeList::ShoppingCart, &auth, recipe_id).await
}

/// Aggregated ingredients of every recipe in the cart as a text file
///
/// GET /api/recipes/download_shopping_cart
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<TextAttachment> {
    let service = ShoppingListService::new(state.service_context());
    let file = service.download(auth.user_id).await?;
    Ok(TextAttachment {
        filename: file.filename,
        content: file.content,
    })
}
