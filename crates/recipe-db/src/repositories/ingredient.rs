//! PostgreSQL implementation of IngredientRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use recipe_core::entities::{Ingredient, NewIngredient};
use recipe_core::error::DomainError;
use recipe_core::traits::{IngredientRepository, RepoResult};
use recipe_core::value_objects::Id;

use crate::mappers::raw_ids;
use crate::models::IngredientModel;

use super::error::{escape_like, map_db_error, map_unique_violation};

/// PostgreSQL implementation of IngredientRepository
#[derive(Clone)]
pub struct PgIngredientRepository {
    pool: PgPool,
}

impl PgIngredientRepository {
    /// Create a new PgIngredientRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngredientRepository for PgIngredientRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Ingredient>> {
        let result = sqlx::query_as::<_, IngredientModel>(
            r"
            SELECT id, name, measurement_unit FROM ingredients WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Ingredient::from))
    }

    #[instrument(skip(self))]
    async fn search(&self, name: Option<&str>) -> RepoResult<Vec<Ingredient>> {
        let rows = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(term) => {
                // Prefix matches rank ahead of other substring matches
                sqlx::query_as::<_, IngredientModel>(
                    r"
                    SELECT id, name, measurement_unit
                    FROM ingredients
                    WHERE name ILIKE ('%' || $1 || '%')
                    ORDER BY
                        CASE WHEN name ILIKE ($1 || '%') THEN 0 ELSE 1 END,
                        name,
                        id
                    ",
                )
                .bind(escape_like(term))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, IngredientModel>(
                    r"
                    SELECT id, name, measurement_unit FROM ingredients ORDER BY name, id
                    ",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[Id]) -> RepoResult<Vec<Ingredient>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, IngredientModel>(
            r"
            SELECT id, name, measurement_unit FROM ingredients WHERE id = ANY($1) ORDER BY id
            ",
        )
        .bind(raw_ids(ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, ingredient: &NewIngredient) -> RepoResult<Ingredient> {
        let model = sqlx::query_as::<_, IngredientModel>(
            r"
            INSERT INTO ingredients (name, measurement_unit)
            VALUES ($1, $2)
            RETURNING id, name, measurement_unit
            ",
        )
        .bind(&ingredient.name)
        .bind(&ingredient.measurement_unit)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::IngredientAlreadyExists))?;

        Ok(Ingredient::from(model))
    }
}
