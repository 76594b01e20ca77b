//! Seed the tag and ingredient catalogs from JSON files
//!
//! ```bash
//! cargo run -p recipe-api --bin load-data -- ingredients data/ingredients.json
//! cargo run -p recipe-api --bin load-data -- tags data/tags.json
//! ```
//!
//! Rows that already exist are skipped, so a file can be loaded twice.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recipe_common::try_init_tracing;
use recipe_core::{
    DomainError, HexColor, IngredientRepository, NewIngredient, NewTag, Slug, TagRepository,
};
use recipe_db::{
    create_pool, run_migrations, DatabaseConfig, PgIngredientRepository, PgTagRepository,
};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(about = "Load ingredients or tags into the recipe database")]
struct Args {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// `[{"name", "measurement_unit"}]`
    Ingredients { file: PathBuf },
    /// `[{"name", "color", "slug"}]`
    Tags { file: PathBuf },
}

#[derive(Debug, Deserialize)]
struct IngredientRecord {
    name: String,
    measurement_unit: String,
}

#[derive(Debug, Deserialize)]
struct TagRecord {
    name: String,
    color: HexColor,
    slug: Slug,
}

#[derive(Debug, Default)]
struct Summary {
    created: usize,
    skipped: usize,
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

async fn load_ingredients(repo: &PgIngredientRepository, path: &Path) -> Result<Summary> {
    let mut summary = Summary::default();
    for record in read_records::<IngredientRecord>(path)? {
        let ingredient = NewIngredient {
            name: record.name,
            measurement_unit: record.measurement_unit,
        };
        match repo.create(&ingredient).await {
            Ok(_) => summary.created += 1,
            Err(DomainError::IngredientAlreadyExists) => {
                warn!(name = %ingredient.name, "Ingredient exists, skipping");
                summary.skipped += 1;
            }
            Err(e) => return Err(e).context("inserting ingredient"),
        }
    }
    Ok(summary)
}

async fn load_tags(repo: &PgTagRepository, path: &Path) -> Result<Summary> {
    let mut summary = Summary::default();
    for record in read_records::<TagRecord>(path)? {
        let tag = NewTag {
            name: record.name,
            color: record.color,
            slug: record.slug,
        };
        match repo.create(&tag).await {
            Ok(_) => summary.created += 1,
            Err(DomainError::TagAlreadyExists) => {
                warn!(slug = %tag.slug, "Tag exists, skipping");
                summary.skipped += 1;
            }
            Err(e) => return Err(e).context("inserting tag"),
        }
    }
    Ok(summary)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    let args = Args::parse();

    let config = DatabaseConfig {
        url: args.database_url,
        max_connections: 2,
        min_connections: 1,
        ..Default::default()
    };
    let pool = create_pool(&config).await.context("connecting to PostgreSQL")?;
    run_migrations(&pool).await.context("applying migrations")?;

    let (kind, summary) = match &args.command {
        Command::Ingredients { file } => {
            let repo = PgIngredientRepository::new(pool.clone());
            ("ingredients", load_ingredients(&repo, file).await?)
        }
        Command::Tags { file } => {
            let repo = PgTagRepository::new(pool.clone());
            ("tags", load_tags(&repo, file).await?)
        }
    };

    info!(kind, created = summary.created, skipped = summary.skipped, "Data loaded");
    pool.close().await;
    Ok(())
}
