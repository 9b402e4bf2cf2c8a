use chrono::Utc;
use tracing::{info, warn};

use crate::db::Insert;
use crate::error::AppError;
use crate::models::Paste;
use crate::App;

/// Store a new paste and return its slug.
///
/// Content and title are trimmed; a blank title is stored as absent. Slug
/// collisions are retried with a fresh candidate up to
/// `slugs.max_attempts` times.
pub async fn create(app: &App, title: &str, content: &str) -> crate::AppResult<String> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::EmptyContent);
    }

    let title = Some(title.trim()).filter(|t| !t.is_empty());

    let attempts = app.config.slugs.max_attempts;
    for attempt in 1..=attempts {
        let slug = app.slugs.generate();
        let outcome = app
            .database
            .insert_paste(&slug, title, content, Utc::now())
            .await?;

        if outcome == Insert::Inserted {
            info!(
                "new paste: slug='{slug}', title={title:?}, size={size}, attempt={attempt}",
                size = content.len()
            );
            return Ok(slug);
        }
    }

    warn!(
        "slug space exhausted: {attempts} attempts failed (space size {space})",
        space = app.slugs.space_size()
    );
    Err(AppError::Exhausted { attempts })
}

pub async fn get(app: &App, slug: &str) -> crate::AppResult<Paste> {
    app.database.get_paste(slug).await
}

/// The `limit` most recent pastes, newest first.
pub async fn list_recent(app: &App, limit: u32) -> crate::AppResult<Vec<Paste>> {
    app.database.get_recent_pastes(limit).await
}
