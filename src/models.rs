use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Paste {
    pub slug: String,
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Paste {
    /// The title to display, falling back to the slug.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.slug)
    }
}
