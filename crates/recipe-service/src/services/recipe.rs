//! Recipe service
//!
//! Recipe CRUD, list filters and the requester-dependent recipe view.

use std::collections::HashSet;

use recipe_core::entities::{IngredientAmount, NewRecipe, Recipe, RecipeChanges, RecipeList};
use recipe_core::traits::{Page, PageRequest, RecipeFilter};
use recipe_core::{DomainError, Id};
use tracing::{info, instrument, warn};

use crate::dto::{
    CreateRecipeRequest, RecipeIngredientResponse, RecipeListQuery, RecipeResponse, TagResponse,
    UpdateRecipeRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::user_view;

/// Render a recipe for the requester
pub(crate) async fn recipe_view(
    ctx: &ServiceContext,
    viewer: Option<Id>,
    recipe: Recipe,
) -> ServiceResult<RecipeResponse> {
    let author = ctx
        .user_repo()
        .find_by_id(recipe.author_id)
        .await?
        .ok_or(DomainError::UserNotFound(recipe.author_id))?;
    let author = user_view(ctx, viewer, &author).await?;

    let tags = ctx.recipe_repo().tags_for(recipe.id).await?;
    let ingredients = ctx.recipe_repo().ingredients_for(recipe.id).await?;

    let (is_favorited, is_in_shopping_cart) = match viewer {
        Some(viewer_id) => {
            let lists = ctx.recipe_list_repo();
            (
                lists.contains(RecipeList::Favorites, viewer_id, recipe.id).await?,
                lists.contains(RecipeList::ShoppingCart, viewer_id, recipe.id).await?,
            )
        }
        None => (false, false),
    };

    Ok(RecipeResponse {
        id: recipe.id,
        tags: tags.iter().map(TagResponse::from).collect(),
        author,
        ingredients: ingredients.iter().map(RecipeIngredientResponse::from).collect(),
        is_favorited,
        is_in_shopping_cart,
        image: ctx.image_storage().url(&recipe.image),
        name: recipe.name,
        text: recipe.text,
        cooking_time: recipe.cooking_time,
        pub_date: recipe.pub_date,
    })
}

/// Translate query filters; viewer-relative filters need an authenticated viewer
fn recipe_filter(query: RecipeListQuery, viewer: Option<Id>) -> RecipeFilter {
    let only_if_set = |flag: Option<u8>| if flag == Some(1) { viewer } else { None };

    RecipeFilter {
        author_id: query.author,
        favorited_by: only_if_set(query.is_favorited),
        in_cart_of: only_if_set(query.is_in_shopping_cart),
        tag_slugs: query.tags,
    }
}

/// Recipe service
pub struct RecipeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RecipeService<'a> {
    /// Create a new RecipeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List recipes newest first
    #[instrument(skip(self))]
    pub async fn list_recipes(
        &self,
        viewer: Option<Id>,
        query: RecipeListQuery,
        page: PageRequest,
    ) -> ServiceResult<Page<RecipeResponse>> {
        let filter = recipe_filter(query, viewer);
        let recipes = self.ctx.recipe_repo().list(&filter, page).await?;

        let mut items = Vec::with_capacity(recipes.items.len());
        for recipe in recipes.items {
            items.push(recipe_view(self.ctx, viewer, recipe).await?);
        }
        Ok(Page::new(items, recipes.total))
    }

    #[instrument(skip(self))]
    pub async fn get_recipe(&self, viewer: Option<Id>, recipe_id: Id) -> ServiceResult<RecipeResponse> {
        let recipe = self.get_recipe_entity(recipe_id).await?;
        recipe_view(self.ctx, viewer, recipe).await
    }

    /// Get recipe entity by ID
    #[instrument(skip(self))]
    pub async fn get_recipe_entity(&self, recipe_id: Id) -> ServiceResult<Recipe> {
        self.ctx
            .recipe_repo()
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| DomainError::RecipeNotFound(recipe_id).into())
    }

    /// Create a recipe authored by `author_id`
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_recipe(
        &self,
        author_id: Id,
        request: CreateRecipeRequest,
    ) -> ServiceResult<RecipeResponse> {
        let mut new_recipe = NewRecipe {
            author_id,
            name: request.name,
            image: String::new(),
            text: request.text,
            cooking_time: request.cooking_time,
            ingredients: request.ingredients.into_iter().map(IngredientAmount::from).collect(),
            tag_ids: request.tags,
        };
        new_recipe.validate()?;
        self.check_references(Some(&new_recipe.ingredients), Some(&new_recipe.tag_ids))
            .await?;

        new_recipe.image = self.ctx.image_storage().save(&request.image).await?;

        let recipe = match self.ctx.recipe_repo().create(&new_recipe).await {
            Ok(recipe) => recipe,
            Err(e) => {
                self.discard_image(&new_recipe.image).await;
                return Err(e.into());
            }
        };

        info!(recipe_id = %recipe.id, author_id = %author_id, "Recipe created");
        recipe_view(self.ctx, Some(author_id), recipe).await
    }

    /// Partially update a recipe; only its author may do so
    #[instrument(skip(self, request))]
    pub async fn update_recipe(
        &self,
        user_id: Id,
        recipe_id: Id,
        request: UpdateRecipeRequest,
    ) -> ServiceResult<RecipeResponse> {
        let existing = self.get_recipe_entity(recipe_id).await?;
        if !existing.is_authored_by(user_id) {
            return Err(DomainError::NotRecipeAuthor.into());
        }

        let mut changes = RecipeChanges {
            name: request.name,
            image: None,
            text: request.text,
            cooking_time: request.cooking_time,
            ingredients: request
                .ingredients
                .map(|items| items.into_iter().map(IngredientAmount::from).collect()),
            tag_ids: request.tags,
        };
        changes.validate()?;
        self.check_references(changes.ingredients.as_deref(), changes.tag_ids.as_deref())
            .await?;

        if let Some(data_uri) = &request.image {
            changes.image = Some(self.ctx.image_storage().save(data_uri).await?);
        }

        let updated = match self.ctx.recipe_repo().update(recipe_id, &changes).await {
            Ok(recipe) => recipe,
            Err(e) => {
                if let Some(path) = &changes.image {
                    self.discard_image(path).await;
                }
                return Err(e.into());
            }
        };

        if changes.image.is_some() {
            self.discard_image(&existing.image).await;
        }

        info!(recipe_id = %recipe_id, user_id = %user_id, "Recipe updated");
        recipe_view(self.ctx, Some(user_id), updated).await
    }

    /// Delete a recipe with its ingredient rows, tag rows and image
    #[instrument(skip(self))]
    pub async fn delete_recipe(&self, user_id: Id, recipe_id: Id) -> ServiceResult<()> {
        let recipe = self.get_recipe_entity(recipe_id).await?;
        if !recipe.is_authored_by(user_id) {
            return Err(DomainError::NotRecipeAuthor.into());
        }

        self.ctx.recipe_repo().delete(recipe_id).await?;
        self.discard_image(&recipe.image).await;

        info!(recipe_id = %recipe_id, user_id = %user_id, "Recipe deleted");
        Ok(())
    }

    /// Every referenced ingredient and tag must exist
    async fn check_references(
        &self,
        ingredients: Option<&[IngredientAmount]>,
        tag_ids: Option<&[Id]>,
    ) -> ServiceResult<()> {
        if let Some(items) = ingredients {
            let ids: Vec<Id> = items.iter().map(|i| i.ingredient_id).collect();
            let found: HashSet<Id> = self
                .ctx
                .ingredient_repo()
                .find_by_ids(&ids)
                .await?
                .into_iter()
                .map(|i| i.id)
                .collect();
            if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
                return Err(DomainError::UnknownIngredient(*missing).into());
            }
        }

        if let Some(ids) = tag_ids {
            let found: HashSet<Id> = self
                .ctx
                .tag_repo()
                .find_by_ids(ids)
                .await?
                .into_iter()
                .map(|t| t.id)
                .collect();
            if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
                return Err(DomainError::UnknownTag(*missing).into());
            }
        }

        Ok(())
    }

    /// Remove an image file; failures only leave an orphan behind
    async fn discard_image(&self, path: &str) {
        if let Err(e) = self.ctx.image_storage().remove(path).await {
            warn!(path = %path, error = %e, "Failed to remove recipe image");
        }
    }
}
