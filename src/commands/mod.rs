pub mod recent;
pub mod serve;

use tracing::info;

use crate::App;

/// Create the schema and exit.
pub async fn init(app: App) -> anyhow::Result<()> {
    app.database.init_schema().await?;
    info!("schema ready at {}", app.config.database.url);
    Ok(())
}
