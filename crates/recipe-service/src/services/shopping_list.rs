//! Shopping list download

use recipe_core::{Id, ShoppingList, SHOPPING_LIST_FILENAME};
use tracing::{info, instrument};

use crate::dto::ShoppingListFile;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Aggregates the shopping cart into a plain-text list
pub struct ShoppingListService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ShoppingListService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sum ingredient amounts across every recipe in the user's cart
    #[instrument(skip(self))]
    pub async fn build(&self, user_id: Id) -> ServiceResult<ShoppingList> {
        let totals = self.ctx.recipe_list_repo().shopping_cart_totals(user_id).await?;
        Ok(ShoppingList::from_totals(totals))
    }

    /// Render the cart as a downloadable file; an empty cart gives an empty body
    #[instrument(skip(self))]
    pub async fn download(&self, user_id: Id) -> ServiceResult<ShoppingListFile> {
        let list = self.build(user_id).await?;

        info!(user_id = %user_id, lines = list.len(), "Shopping list generated");
        Ok(ShoppingListFile {
            filename: SHOPPING_LIST_FILENAME,
            content: list.render(),
        })
    }
}
