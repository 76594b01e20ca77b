//! Database connection pool and migrations

mod postgres;

pub use postgres::{create_pool, migrator, run_migrations, DatabaseConfig};
pub use sqlx::PgPool;
