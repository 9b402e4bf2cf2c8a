use chrono::{DateTime, Utc};
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use tracing::debug;

use crate::error::is_unique_violation;
use crate::models::Paste;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS pastes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    title TEXT,
    content TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// Same layout as `CURRENT_TIMESTAMP` plus microseconds, so bound and
/// defaulted values order correctly as text.
const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS pastes_created_at ON pastes (created_at)";

/// Result of a single insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insert {
    Inserted,
    SlugTaken,
}

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    /// Connect to a database by URL.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Create the schema if it does not exist yet.
    pub async fn init_schema(&self) -> crate::AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(CREATE_TABLE).execute(&mut conn).await?;
        sqlx::query(CREATE_INDEX).execute(&mut conn).await?;
        Ok(())
    }

    /// Insert a paste unless the slug is already taken.
    ///
    /// The `UNIQUE` constraint on `slug` is the only collision check, so two
    /// concurrent inserts of the same slug can never both succeed.
    pub async fn insert_paste(
        &self,
        slug: &str,
        title: Option<&str>,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> crate::AppResult<Insert> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(
            "INSERT INTO pastes (slug, title, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(slug)
        .bind(title)
        .bind(content)
        .bind(created_at.format(STORED_TIMESTAMP_FORMAT).to_string())
        .execute(&mut conn)
        .await;

        match result {
            Ok(_) => Ok(Insert::Inserted),
            Err(error) if is_unique_violation(&error) => {
                debug!("slug collision: {slug}");
                Ok(Insert::SlugTaken)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Get a paste by slug.
    pub async fn get_paste(&self, slug: &str) -> crate::AppResult<Paste> {
        let mut conn = self.pool.acquire().await?;
        let paste = sqlx::query_as::<_, Paste>(
            "SELECT slug, title, content, created_at FROM pastes WHERE slug = ?",
        )
        .bind(slug)
        .fetch_one(&mut conn)
        .await?;
        Ok(paste)
    }

    /// Get up to `limit` pastes, newest first.
    pub async fn get_recent_pastes(&self, limit: u32) -> crate::AppResult<Vec<Paste>> {
        let mut conn = self.pool.acquire().await?;
        let pastes = sqlx::query_as::<_, Paste>(
            "SELECT slug, title, content, created_at FROM pastes \
             ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&mut conn)
        .await?;
        Ok(pastes)
    }

    /// Count stored pastes.
    pub async fn count_pastes(&self) -> crate::AppResult<i64> {
        let mut conn = self.pool.acquire().await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pastes")
            .fetch_one(&mut conn)
            .await?;
        Ok(count)
    }
}
