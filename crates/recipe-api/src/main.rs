//! Recipe API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p recipe-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env`.

use recipe_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(err) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {}", err);
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::from_app_config(&config)) {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        "Starting Recipe API Server"
    );

    if let Err(e) = recipe_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
