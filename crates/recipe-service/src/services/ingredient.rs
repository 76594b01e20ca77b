//! Ingredient service

use recipe_core::{DomainError, Id};
use tracing::instrument;

use crate::dto::IngredientResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Read-only ingredient lookups
pub struct IngredientService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IngredientService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All ingredients, or those matching `name`
    ///
    /// Matching is case-insensitive. Names starting with the term come
    /// before names that merely contain it.
    #[instrument(skip(self))]
    pub async fn search(&self, name: Option<&str>) -> ServiceResult<Vec<IngredientResponse>> {
        let term = name.map(str::trim).filter(|t| !t.is_empty());
        let ingredients = self.ctx.ingredient_repo().search(term).await?;
        Ok(ingredients.into_iter().map(IngredientResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_ingredient(&self, ingredient_id: Id) -> ServiceResult<IngredientResponse> {
        self.ctx
            .ingredient_repo()
            .find_by_id(ingredient_id)
            .await?
            .map(IngredientResponse::from)
            .ok_or_else(|| DomainError::IngredientNotFound(ingredient_id).into())
    }
}
