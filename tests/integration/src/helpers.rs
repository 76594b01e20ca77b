//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests,
//! and seeding catalog rows the API cannot create.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use recipe_api::{create_app, create_app_state};
use recipe_common::AppConfig;
use recipe_core::{HexColor, Id, IngredientRepository, NewIngredient, NewTag, Slug, TagRepository};
use recipe_db::{create_pool, DatabaseConfig, PgIngredientRepository, PgPool, PgTagRepository};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::unique_suffix;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub pool: PgPool,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            pool,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", token))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authorized(self.client.get(self.url(path)), token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_auth_empty(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authorized(self.client.post(self.url(path)), token).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(Self::authorized(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(Self::authorized(self.client.patch(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::authorized(self.client.delete(self.url(path)), token).send().await?)
    }

    /// Insert an ingredient with a unique name
    pub async fn seed_ingredient(&self, name: &str, unit: &str) -> Result<Id> {
        let repo = PgIngredientRepository::new(self.pool.clone());
        let ingredient = repo
            .create(&NewIngredient {
                name: format!("{name} {}", unique_suffix()),
                measurement_unit: unit.to_string(),
            })
            .await?;
        Ok(ingredient.id)
    }

    /// Insert a tag with a unique slug and color
    pub async fn seed_tag(&self) -> Result<Id> {
        let suffix = unique_suffix();
        let repo = PgTagRepository::new(self.pool.clone());
        let tag = repo
            .create(&NewTag {
                name: format!("Tag {suffix}"),
                color: HexColor::parse(&format!("#{}", &suffix[..6]))?,
                slug: Slug::parse(&format!("tag_{suffix}"))?,
            })
            .await?;
        Ok(tag.id)
    }
}

/// Create a test configuration
///
/// Only `DATABASE_URL` and `REDIS_URL` have to be set; everything else
/// gets a test default.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    for (key, value) in [("API_PORT", "0"), ("JWT_SECRET", "integration-test-secret")] {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
        }
    }

    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 1000;
    config.storage.upload_dir = std::env::temp_dir()
        .join("recipe-integration-media")
        .to_string_lossy()
        .into_owned();

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
