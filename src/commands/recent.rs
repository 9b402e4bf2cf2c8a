use crate::controllers::paste;
use crate::render::TIMESTAMP_FORMAT;
use crate::App;

/// Print the most recent pastes, newest first.
pub async fn run(app: App, limit: Option<u32>) -> anyhow::Result<()> {
    app.database.init_schema().await?;

    let limit = limit.unwrap_or(app.config.recent.limit);
    let pastes = paste::list_recent(&app, limit).await?;

    if pastes.is_empty() {
        println!("no pastes yet");
        return Ok(());
    }

    for paste in pastes {
        println!(
            "{slug}  {created}  {title}",
            slug = paste.slug,
            created = paste.created_at.format(TIMESTAMP_FORMAT),
            title = paste.title.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}
