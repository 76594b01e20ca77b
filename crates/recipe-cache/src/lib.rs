//! # recipe-cache
//!
//! Redis layer for auth sessions.
//!
//! ## Example
//!
//! ```ignore
//! use recipe_cache::{AuthSessionData, AuthSessionStore, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = AuthSessionStore::with_ttl(pool, token_expiry_seconds);
//!
//! sessions.create(&session_id, &AuthSessionData::new(user_id)).await?;
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};

// Re-export session types
pub use session::{AuthSessionData, AuthSessionStore};
