//! PostgreSQL implementation of RecipeListRepository (favorites, shopping cart)

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use recipe_core::entities::RecipeList;
use recipe_core::shopping_list::IngredientTotal;
use recipe_core::traits::{RecipeListRepository, RepoResult};
use recipe_core::value_objects::Id;

use crate::models::IngredientTotalModel;

use super::error::{map_db_error, recipe_not_found};

/// Backing table of a recipe list; both share the same shape
const fn table(list: RecipeList) -> &'static str {
    match list {
        RecipeList::Favorites => "favorites",
        RecipeList::ShoppingCart => "shopping_cart",
    }
}

/// PostgreSQL implementation of RecipeListRepository
#[derive(Clone)]
pub struct PgRecipeListRepository {
    pool: PgPool,
}

impl PgRecipeListRepository {
    /// Create a new PgRecipeListRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeListRepository for PgRecipeListRepository {
    #[instrument(skip(self))]
    async fn contains(&self, list: RecipeList, user_id: Id, recipe_id: Id) -> RepoResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE user_id = $1 AND recipe_id = $2)",
            table(list)
        );
        let result = sqlx::query_scalar::<_, bool>(&sql)
            .bind(user_id.into_inner())
            .bind(recipe_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn add(&self, list: RecipeList, user_id: Id, recipe_id: Id) -> RepoResult<()> {
        let sql = format!(
            "INSERT INTO {} (user_id, recipe_id) VALUES ($1, $2)",
            table(list)
        );
        sqlx::query(&sql)
            .bind(user_id.into_inner())
            .bind(recipe_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_unique_violation() => list.already_present(recipe_id),
                Some(db) if db.is_foreign_key_violation() => recipe_not_found(recipe_id),
                _ => map_db_error(e),
            })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, list: RecipeList, user_id: Id, recipe_id: Id) -> RepoResult<bool> {
        let sql = format!(
            "DELETE FROM {} WHERE user_id = $1 AND recipe_id = $2",
            table(list)
        );
        let result = sqlx::query(&sql)
            .bind(user_id.into_inner())
            .bind(recipe_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn shopping_cart_totals(&self, user_id: Id) -> RepoResult<Vec<IngredientTotal>> {
        let rows = sqlx::query_as::<_, IngredientTotalModel>(
            r"
            SELECT i.id, i.name, i.measurement_unit, SUM(ri.amount)::BIGINT AS total
            FROM shopping_cart c
            JOIN recipe_ingredients ri ON ri.recipe_id = c.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE c.user_id = $1
            GROUP BY i.id, i.name, i.measurement_unit
            ORDER BY i.name, i.id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(IngredientTotal::from).collect())
    }
}
