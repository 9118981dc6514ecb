//! # Client Configuration
//!
//! Where the database lives and how chatty the logs are.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ARTICLE_DESK_DB_PATH=/var/lib/articles.db                          │
//! │     ARTICLE_DESK_BUSY_TIMEOUT_MS=2000                                  │
//! │     RUST_LOG=article_db=debug   (read by the log filter itself)        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $ARTICLE_DESK_CONFIG, or                                           │
//! │     ~/.config/article-desk/article-desk.toml (Linux)                   │
//! │     ~/Library/Application Support/com.article-desk.article-desk/...    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     articles.db in the working directory, 5000 ms, "warn"              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # article-desk.toml
//! [database]
//! path = "articles.db"
//! busy_timeout_ms = 5000
//!
//! [logging]
//! filter = "warn"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use article_db::DbConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "ARTICLE_DESK_CONFIG";
/// Environment variable overriding the database path.
pub const DB_PATH_VAR: &str = "ARTICLE_DESK_DB_PATH";
/// Environment variable overriding the busy timeout.
pub const BUSY_TIMEOUT_VAR: &str = "ARTICLE_DESK_BUSY_TIMEOUT_MS";

const CONFIG_FILE_NAME: &str = "article-desk.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Lock wait in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("articles.db")
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_filter(),
        }
    }
}

// =============================================================================
// CliConfig
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`ARTICLE_DESK_CONFIG` or the platform config dir)
    /// 3. Environment variables
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load() -> ConfigResult<Self> {
        let explicit = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        let mut config = match explicit.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Reads a config file. Sections and keys left out keep their defaults.
    pub fn from_file(path: PathBuf) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".into()));
        }

        if self.database.busy_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "database.busy_timeout_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from `lookup` (the process environment in [`load`]).
    ///
    /// Unparseable values are logged and ignored.
    ///
    /// [`load`]: CliConfig::load
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(DB_PATH_VAR) {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(timeout) = lookup(BUSY_TIMEOUT_VAR) {
            match timeout.trim().parse::<u64>() {
                Ok(ms) => self.database.busy_timeout_ms = ms,
                Err(_) => warn!(value = %timeout, "Ignoring invalid {}", BUSY_TIMEOUT_VAR),
            }
        }
    }

    /// Connection settings for `article-db`.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database.path.clone())
            .busy_timeout(Duration::from_millis(self.database.busy_timeout_ms))
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "article-desk", "article-desk")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
