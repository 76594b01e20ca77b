//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use recipe_core::entities::{Follow, User};
use recipe_core::error::DomainError;
use recipe_core::traits::{FollowRepository, Page, PageRequest, RepoResult};
use recipe_core::value_objects::Id;

use crate::models::UserModel;

use super::error::map_db_error;

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    /// Create a new PgFollowRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn exists(&self, user_id: Id, author_id: Id) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM follows WHERE user_id = $1 AND author_id = $2)
            ",
        )
        .bind(user_id.into_inner())
        .bind(author_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn create(&self, follow: &Follow) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO follows (user_id, author_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(follow.user_id.into_inner())
        .bind(follow.author_id.into_inner())
        .bind(follow.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => DomainError::AlreadySubscribed(follow.author_id),
            Some(db) if db.is_check_violation() => DomainError::CannotSubscribeToSelf,
            Some(db) if db.is_foreign_key_violation() => DomainError::UserNotFound(follow.author_id),
            _ => map_db_error(e),
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: Id, author_id: Id) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM follows WHERE user_id = $1 AND author_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(author_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_authors(&self, user_id: Id, page: PageRequest) -> RepoResult<Page<User>> {
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM follows WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.created_at, u.updated_at
            FROM follows f
            JOIN users u ON u.id = f.author_id
            WHERE f.user_id = $1
            ORDER BY u.id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(User::from).collect(), total))
    }
}
