//! Auth session storage in Redis.
//!
//! Every issued auth token carries a session id. A token is honored only
//! while its session key exists, so logout takes effect immediately.

use crate::pool::{RedisPool, RedisResult};
use recipe_core::Id;
use serde::{Deserialize, Serialize};

/// Key prefix for auth sessions
const SESSION_PREFIX: &str = "auth_session:";

/// Stored session data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSessionData {
    /// User this session belongs to
    pub user_id: Id,
    /// Login timestamp (Unix epoch seconds)
    pub created_at: i64,
}

impl AuthSessionData {
    #[must_use]
    pub fn new(user_id: Id) -> Self {
        Self {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Session store backing token login/logout
#[derive(Clone)]
pub struct AuthSessionStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl AuthSessionStore {
    /// Sessions expire together with the tokens that reference them
    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}{session_id}")
    }

    /// Store a session
    pub async fn create(&self, session_id: &str, data: &AuthSessionData) -> RedisResult<()> {
        self.pool
            .set(&Self::key(session_id), data, Some(self.ttl_seconds))
            .await?;

        tracing::debug!(
            session_id = %session_id,
            user_id = %data.user_id,
            "Stored auth session"
        );

        Ok(())
    }

    /// Look up a live session
    pub async fn get(&self, session_id: &str) -> RedisResult<Option<AuthSessionData>> {
        self.pool.get_value(&Self::key(session_id)).await
    }

    /// Delete a session; returns whether it existed
    pub async fn revoke(&self, session_id: &str) -> RedisResult<bool> {
        let deleted = self.pool.delete(&Self::key(session_id)).await?;
        if deleted {
            tracing::debug!(session_id = %session_id, "Revoked auth session");
        }

        Ok(deleted)
    }
}

impl std::fmt::Debug for AuthSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSessionStore")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}
