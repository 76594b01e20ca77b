//! PostgreSQL implementation of RecipeRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use recipe_core::entities::{
    IngredientAmount, NewRecipe, Recipe, RecipeChanges, RecipeIngredient, Tag,
};
use recipe_core::error::DomainError;
use recipe_core::traits::{Page, PageRequest, RecipeFilter, RecipeRepository, RepoResult};
use recipe_core::value_objects::Id;

use crate::mappers::{ingredient_columns, raw_ids, tags_from_models};
use crate::models::{RecipeIngredientModel, RecipeModel, TagModel};

use super::error::{map_db_error, map_foreign_key_violation, recipe_not_found};

/// Shared WHERE clause of the list and count queries
///
/// $1 author, $2 tag slugs, $3 favorited by, $4 in cart of; NULL or an
/// empty array disables a filter.
macro_rules! recipe_filter_sql {
    () => {
        r"
        WHERE ($1::BIGINT IS NULL OR r.author_id = $1)
          AND (cardinality($2::TEXT[]) = 0 OR EXISTS (
                SELECT 1 FROM recipe_tags rt
                JOIN tags t ON t.id = rt.tag_id
                WHERE rt.recipe_id = r.id AND t.slug = ANY($2)))
          AND ($3::BIGINT IS NULL OR EXISTS (
                SELECT 1 FROM favorites f WHERE f.recipe_id = r.id AND f.user_id = $3))
          AND ($4::BIGINT IS NULL OR EXISTS (
                SELECT 1 FROM shopping_cart c WHERE c.recipe_id = r.id AND c.user_id = $4))
        "
    };
}

/// PostgreSQL implementation of RecipeRepository
#[derive(Clone)]
pub struct PgRecipeRepository {
    pool: PgPool,
}

impl PgRecipeRepository {
    /// Create a new PgRecipeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unknown_reference() -> DomainError {
    DomainError::ValidationError("Recipe references an unknown ingredient or tag".to_string())
}

/// Replace the ingredient rows of a recipe
async fn replace_ingredients(
    conn: &mut PgConnection,
    recipe_id: i64,
    items: &[IngredientAmount],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;

    let (ingredient_ids, amounts) = ingredient_columns(items);
    sqlx::query(
        r"
        INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
        SELECT $1, i.ingredient_id, i.amount
        FROM UNNEST($2::BIGINT[], $3::INTEGER[]) AS i(ingredient_id, amount)
        ",
    )
    .bind(recipe_id)
    .bind(ingredient_ids)
    .bind(amounts)
    .execute(&mut *conn)
    .await
    .map_err(|e| map_foreign_key_violation(e, unknown_reference))?;

    Ok(())
}

/// Replace the tag rows of a recipe
async fn replace_tags(conn: &mut PgConnection, recipe_id: i64, tag_ids: &[Id]) -> RepoResult<()> {
    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;

    sqlx::query(
        r"
        INSERT INTO recipe_tags (recipe_id, tag_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ",
    )
    .bind(recipe_id)
    .bind(raw_ids(tag_ids))
    .execute(&mut *conn)
    .await
    .map_err(|e| map_foreign_key_violation(e, unknown_reference))?;

    Ok(())
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Recipe>> {
        let result = sqlx::query_as::<_, RecipeModel>(
            r"
            SELECT id, author_id, name, image, text, cooking_time, pub_date
            FROM recipes
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Recipe::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &RecipeFilter, page: PageRequest) -> RepoResult<Page<Recipe>> {
        let author = filter.author_id.map(Id::into_inner);
        let favorited_by = filter.favorited_by.map(Id::into_inner);
        let in_cart_of = filter.in_cart_of.map(Id::into_inner);

        let total = sqlx::query_scalar::<_, i64>(concat!(
            "SELECT COUNT(*) FROM recipes r",
            recipe_filter_sql!()
        ))
        .bind(author)
        .bind(&filter.tag_slugs)
        .bind(favorited_by)
        .bind(in_cart_of)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, RecipeModel>(concat!(
            "SELECT r.id, r.author_id, r.name, r.image, r.text, r.cooking_time, r.pub_date
             FROM recipes r",
            recipe_filter_sql!(),
            "ORDER BY r.pub_date DESC, r.id DESC
             LIMIT $5 OFFSET $6"
        ))
        .bind(author)
        .bind(&filter.tag_slugs)
        .bind(favorited_by)
        .bind(in_cart_of)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(Recipe::from).collect(), total))
    }

    #[instrument(skip(self, recipe), fields(author_id = %recipe.author_id))]
    async fn create(&self, recipe: &NewRecipe) -> RepoResult<Recipe> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, RecipeModel>(
            r"
            INSERT INTO recipes (author_id, name, image, text, cooking_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, author_id, name, image, text, cooking_time, pub_date
            ",
        )
        .bind(recipe.author_id.into_inner())
        .bind(&recipe.name)
        .bind(&recipe.image)
        .bind(&recipe.text)
        .bind(recipe.cooking_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(recipe.author_id)))?;

        replace_ingredients(&mut tx, model.id, &recipe.ingredients).await?;
        replace_tags(&mut tx, model.id, &recipe.tag_ids).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Recipe::from(model))
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: Id, changes: &RecipeChanges) -> RepoResult<Recipe> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, RecipeModel>(
            r"
            UPDATE recipes
            SET name = COALESCE($2, name),
                image = COALESCE($3, image),
                text = COALESCE($4, text),
                cooking_time = COALESCE($5, cooking_time)
            WHERE id = $1
            RETURNING id, author_id, name, image, text, cooking_time, pub_date
            ",
        )
        .bind(id.into_inner())
        .bind(changes.name.as_deref())
        .bind(changes.image.as_deref())
        .bind(changes.text.as_deref())
        .bind(changes.cooking_time)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| recipe_not_found(id))?;

        if let Some(ingredients) = &changes.ingredients {
            replace_ingredients(&mut tx, model.id, ingredients).await?;
        }
        if let Some(tag_ids) = &changes.tag_ids {
            replace_tags(&mut tx, model.id, tag_ids).await?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(Recipe::from(model))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        // Ingredient, tag, favorite and cart rows go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(recipe_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn ingredients_for(&self, recipe_id: Id) -> RepoResult<Vec<RecipeIngredient>> {
        let rows = sqlx::query_as::<_, RecipeIngredientModel>(
            r"
            SELECT i.id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY ri.id
            ",
        )
        .bind(recipe_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(RecipeIngredient::from).collect())
    }

    #[instrument(skip(self))]
    async fn tags_for(&self, recipe_id: Id) -> RepoResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagModel>(
            r"
            SELECT t.id, t.name, t.color, t.slug
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = $1
            ORDER BY t.id
            ",
        )
        .bind(recipe_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        tags_from_models(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: Id, limit: Option<i64>) -> RepoResult<Vec<Recipe>> {
        // LIMIT NULL means no limit
        let rows = sqlx::query_as::<_, RecipeModel>(
            r"
            SELECT id, author_id, name, image, text, cooking_time, pub_date
            FROM recipes
            WHERE author_id = $1
            ORDER BY pub_date DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(author_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_author(&self, author_id: Id) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM recipes WHERE author_id = $1
            ",
        )
        .bind(author_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
