//! Application settings loading from config.toml and the environment.
//!
//! A `config.toml` next to the binary supplies defaults for the database URL
//! and the admin API; environment variables (`DATABASE_URL`, `API_BIND_ADDR`,
//! `DASHBOARD_TOKEN`) take precedence so deployments can stay file-less. The
//! Discord token is deliberately not part of [`Settings`] - `main` reads
//! `DISCORD_BOT_TOKEN` directly before use.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default database when neither config.toml nor `DATABASE_URL` is set
const DEFAULT_DATABASE_URL: &str = "sqlite://data/stockvend.sqlite";
/// Default bind address for the admin API
const DEFAULT_API_BIND_ADDR: &str = "127.0.0.1:3001";

/// Resolved application settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Connection URL for the backing database
    pub database_url: String,
    /// Socket address the admin API listens on
    pub api_bind_addr: String,
    /// Bearer token dashboard requests must present; `None` disables the API's
    /// auth check (local development only)
    pub dashboard_token: Option<String>,
    /// Whether to create tables on startup (fresh `SQLite` files); hosted
    /// databases that already carry the schema leave this off
    pub create_tables: bool,
}

/// Raw config.toml structure before environment overrides
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    database: DatabaseSection,
    #[serde(default)]
    api: ApiSection,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSection {
    url: Option<String>,
    #[serde(default)]
    create_tables: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSection {
    bind_addr: Option<String>,
    dashboard_token: Option<String>,
}

impl Settings {
    /// Loads settings from the default location (./config.toml), tolerating a
    /// missing file, then applies environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Loads settings from a specific config file path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = if path.as_ref().exists() {
            let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
                message: format!("Failed to read config file: {e}"),
            })?;
            toml::from_str(&contents).map_err(|e| Error::Config {
                message: format!("Failed to parse config.toml: {e}"),
            })?
        } else {
            SettingsFile::default()
        };

        Ok(Self::from_file(file))
    }

    /// Merges a parsed settings file with environment overrides and defaults.
    fn from_file(file: SettingsFile) -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .or(file.database.url)
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let api_bind_addr = std::env::var("API_BIND_ADDR")
            .ok()
            .or(file.api.bind_addr)
            .unwrap_or_else(|| DEFAULT_API_BIND_ADDR.to_string());

        let dashboard_token = std::env::var("DASHBOARD_TOKEN")
            .ok()
            .or(file.api.dashboard_token);

        Self {
            database_url,
            api_bind_addr,
            dashboard_token,
            create_tables: file.database.create_tables,
        }
    }
}
