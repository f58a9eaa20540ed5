use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{FeederError, FeederResult};

pub const DEFAULT_PANEL_NAME: &str = "security_news_rss";
pub const DEFAULT_SOURCE_FEED: &str = "rss_feed";
pub const DEFAULT_MAX_RESULTS: usize = 100;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// RDS connection parameters.
///
/// None of them have defaults. A missing value is reported when a
/// connection is attempted, not at startup.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub endpoint: Option<String>,
    pub db_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ca_bundle: Option<PathBuf>,
    pub connect_timeout: Duration,
}

/// Identity and batch size of the panel being populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSettings {
    pub panel_name: String,
    pub source_feed: String,
    pub max_results: usize,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            panel_name: DEFAULT_PANEL_NAME.to_string(),
            source_feed: DEFAULT_SOURCE_FEED.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseSettings,
    pub panel: PanelSettings,
    pub sqlite_path: Option<PathBuf>,
    pub feed_items_file: Option<PathBuf>,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> FeederResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> FeederResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let max_results = match var("MAX_RESULTS") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| FeederError::InvalidEnvVar {
                    name: "MAX_RESULTS".to_string(),
                    value: raw.clone(),
                })?,
            None => DEFAULT_MAX_RESULTS,
        };

        let panel = PanelSettings {
            panel_name: var("PANEL_NAME").unwrap_or_else(|| DEFAULT_PANEL_NAME.to_string()),
            source_feed: var("SOURCE_FEED").unwrap_or_else(|| DEFAULT_SOURCE_FEED.to_string()),
            max_results,
        };

        let database = DatabaseSettings {
            endpoint: var("RDS_ENDPOINT"),
            db_name: var("RDS_DB_NAME"),
            username: var("RDS_USERNAME"),
            password: var("RDS_PASSWORD"),
            ca_bundle: var("RDS_CA_BUNDLE").map(PathBuf::from),
            connect_timeout: CONNECT_TIMEOUT,
        };

        Ok(Self {
            database,
            panel,
            sqlite_path: var("PANEL_FEED_SQLITE_PATH").map(PathBuf::from),
            feed_items_file: var("FEED_ITEMS_FILE").map(PathBuf::from),
        })
    }
}
