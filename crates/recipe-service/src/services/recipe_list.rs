//! Favorites and shopping cart
//!
//! Both lists share one guard: the recipe must exist, adding twice is
//! rejected and removing an absent entry is rejected.

use recipe_core::entities::RecipeList;
use recipe_core::Id;
use tracing::{info, instrument};

use crate::dto::ShortRecipeResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::recipe::RecipeService;

/// Favorites / shopping cart service
pub struct RecipeListService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RecipeListService<'a> {
    /// Create a new RecipeListService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Put a recipe on a list
    ///
    /// # Errors
    /// - `RecipeNotFound` if the recipe does not exist
    /// - `AlreadyInFavorites` / `AlreadyInShoppingCart` if it is already there
    #[instrument(skip(self))]
    pub async fn add(
        &self,
        list: RecipeList,
        user_id: Id,
        recipe_id: Id,
    ) -> ServiceResult<ShortRecipeResponse> {
        let recipe = RecipeService::new(self.ctx).get_recipe_entity(recipe_id).await?;

        let repo = self.ctx.recipe_list_repo();
        if repo.contains(list, user_id, recipe.id).await? {
            return Err(list.already_present(recipe.id).into());
        }
        // A concurrent duplicate is caught by the unique constraint
        repo.add(list, user_id, recipe.id).await?;

        info!(list = list.as_str(), user_id = %user_id, recipe_id = %recipe.id, "Recipe added to list");
        Ok(ShortRecipeResponse::new(
            &recipe,
            self.ctx.image_storage().url(&recipe.image),
        ))
    }

    /// Take a recipe off a list
    ///
    /// # Errors
    /// - `RecipeNotFound` if the recipe does not exist
    /// - `NotInFavorites` / `NotInShoppingCart` if it is not there
    #[instrument(skip(self))]
    pub async fn remove(&self, list: RecipeList, user_id: Id, recipe_id: Id) -> ServiceResult<()> {
        let recipe = RecipeService::new(self.ctx).get_recipe_entity(recipe_id).await?;

        let repo = self.ctx.recipe_list_repo();
        if !repo.contains(list, user_id, recipe.id).await? {
            return Err(list.not_present(recipe.id).into());
        }
        if !repo.remove(list, user_id, recipe.id).await? {
            return Err(list.not_present(recipe.id).into());
        }

        info!(list = list.as_str(), user_id = %user_id, recipe_id = %recipe.id, "Recipe removed from list");
        Ok(())
    }
}
