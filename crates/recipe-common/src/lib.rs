//! # recipe-common
//!
//! Shared utilities including configuration, error handling, authentication,
//! image storage and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, Claims, JwtService,
    MIN_PASSWORD_LEN,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    LogConfig, LogFormat, RateLimitConfig, RedisConfig, ServerConfig, StorageConfig,
};
pub use error::{AppError, AppResult};
pub use storage::{decode_data_uri, DecodedImage, ImageStorage, ALLOWED_IMAGE_EXTENSIONS};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
