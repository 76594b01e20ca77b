//! PostgreSQL implementation of TagRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use recipe_core::entities::{NewTag, Tag};
use recipe_core::error::DomainError;
use recipe_core::traits::{RepoResult, TagRepository};
use recipe_core::value_objects::Id;

use crate::mappers::{raw_ids, tags_from_models};
use crate::models::TagModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of TagRepository
#[derive(Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    /// Create a new PgTagRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Tag>> {
        let result = sqlx::query_as::<_, TagModel>(
            r"
            SELECT id, name, color, slug FROM tags WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Tag::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagModel>(
            r"
            SELECT id, name, color, slug FROM tags ORDER BY name, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        tags_from_models(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[Id]) -> RepoResult<Vec<Tag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, TagModel>(
            r"
            SELECT id, name, color, slug FROM tags WHERE id = ANY($1) ORDER BY id
            ",
        )
        .bind(raw_ids(ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        tags_from_models(rows)
    }

    #[instrument(skip(self))]
    async fn create(&self, tag: &NewTag) -> RepoResult<Tag> {
        let model = sqlx::query_as::<_, TagModel>(
            r"
            INSERT INTO tags (name, color, slug)
            VALUES ($1, $2, $3)
            RETURNING id, name, color, slug
            ",
        )
        .bind(&tag.name)
        .bind(tag.color.as_str())
        .bind(tag.slug.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::TagAlreadyExists))?;

        Tag::try_from(model)
    }
}
