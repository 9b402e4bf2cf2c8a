use std::path::PathBuf;

use clap::{Parser, Subcommand};
use slugbin::config::Config;
use slugbin::{commands, App};
use tracing_subscriber::EnvFilter;

/// A small pastebin keyed by random slugs.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long, env = "PASTE_HOST", global = true)]
    host: Option<String>,

    /// Port to listen on.
    #[arg(long, env = "PASTE_PORT", global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve pastes over HTTP (the default).
    Serve,
    /// Create the database schema.
    Init,
    /// List the most recent pastes.
    Recent {
        #[arg(short = 'n', long)]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let app = App::new(config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => commands::serve::run(app).await,
        Command::Init => commands::init(app).await,
        Command::Recent { limit } => commands::recent::run(app, limit).await,
    }
}
