use axum::extract::FromRef;

pub mod commands;
pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod models;
pub mod render;
pub mod slug;

use config::Config;
use db::Database;
pub use error::{ApiError, ApiResult, AppError, AppResult};
use slug::SlugGenerator;

/// Shared handles for every operation: configuration, the paste database and
/// the slug generator.
#[derive(Clone, FromRef)]
pub struct App {
    pub config: Config,
    pub database: Database,
    pub slugs: SlugGenerator,
}

impl App {
    /// Connect to the configured database and validate the slug settings.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        if config.slugs.max_attempts == 0 {
            return Err(AppError::InvalidSlugConfig("max_attempts must be positive").into());
        }
        let slugs = SlugGenerator::new(&config.slugs.alphabet, config.slugs.length)?;
        let database =
            Database::connect(&config.database.url, config.database.max_connections).await?;
        Ok(App {
            config,
            database,
            slugs,
        })
    }
}
