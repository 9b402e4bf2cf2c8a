use std::path::{Path, PathBuf};

use anyhow::Context;
use directories_next::ProjectDirs;
use serde::Deserialize;

use crate::slug::{DEFAULT_ALPHABET, DEFAULT_LENGTH};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: Server,
    pub database: Database,
    pub slugs: Slugs,
    pub recent: Recent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub host: String,
    pub port: u16,
    pub max_upload_size: usize,
}

impl Default for Server {
    fn default() -> Self {
        Server {
            host: "127.0.0.1".into(),
            port: 6002,
            max_upload_size: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
}

impl Default for Database {
    fn default() -> Self {
        Database {
            url: "sqlite://pastes.sqlite3?mode=rwc".into(),
            max_connections: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Slugs {
    pub alphabet: String,
    pub length: usize,
    /// Insert attempts before giving up on finding a free slug.
    pub max_attempts: u32,
}

impl Default for Slugs {
    fn default() -> Self {
        Slugs {
            alphabet: DEFAULT_ALPHABET.into(),
            length: DEFAULT_LENGTH,
            max_attempts: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Recent {
    pub limit: u32,
}

impl Default for Recent {
    fn default() -> Self {
        Recent { limit: 10 }
    }
}

impl Config {
    /// Load the config file at `path`, or from the default locations.
    ///
    /// An explicitly given path must exist. Without one, `config.toml` in the
    /// working directory is tried, then the platform config directory, and
    /// the built-in defaults are used if neither is present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }

        match default_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::read(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        toml::from_str(source).context("failed to deserialize config")
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_toml(&source)
    }
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("config.toml")];
    if let Some(dirs) = ProjectDirs::from("", "", "slugbin") {
        paths.push(dirs.config_dir().join("config.toml"));
    }
    paths
}
