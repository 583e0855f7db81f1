//! Application configuration loaded from a properties file and the
//! environment.
//!
//! The properties file uses `key=value` lines and is created with defaults
//! on first run. A missing or unreadable file never stops startup.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.properties";
/// Default database file name.
pub const DEFAULT_DATABASE_FILE: &str = "database.db";

/// Environment variable overriding `databaseFile`.
pub const DATABASE_FILE_ENV: &str = "RUNIT_DATABASE_FILE";

const DATABASE_FILE_KEY: &str = "databaseFile";
const SEED_DEMO_USER_KEY: &str = "seedDemoUser";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database file
    pub database_file: PathBuf,
    /// Create the `test` / `pass` account on startup if missing
    pub seed_demo_user: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_file: PathBuf::from(DEFAULT_DATABASE_FILE),
            seed_demo_user: true,
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults on any file error.
    ///
    /// Creates the file with default contents if it does not exist. The
    /// `RUNIT_DATABASE_FILE` environment variable (also read from `.env`)
    /// overrides the file's database setting.
    pub fn load(path: &Path) -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let mut config = match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Using default configuration");
                Self::default()
            }
        };

        if let Ok(database_file) = env::var(DATABASE_FILE_ENV) {
            if !database_file.trim().is_empty() {
                config.database_file = PathBuf::from(database_file.trim());
            }
        }

        config
    }

    /// Read a properties file, creating it with defaults if missing.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            write_default_file(path)?;
            tracing::info!(path = %path.display(), "Created default configuration file");
        }

        let mut config = Self::default();
        let entries =
            dotenvy::from_path_iter(path).map_err(|e| ConfigError::Parse(e.to_string()))?;

        for entry in entries {
            let (key, value) = entry.map_err(|e| ConfigError::Parse(e.to_string()))?;
            match key.as_str() {
                DATABASE_FILE_KEY => {
                    if value.trim().is_empty() {
                        return Err(ConfigError::Invalid {
                            key: DATABASE_FILE_KEY,
                            value,
                        });
                    }
                    config.database_file = PathBuf::from(value.trim());
                }
                SEED_DEMO_USER_KEY => {
                    config.seed_demo_user = parse_bool(&value).ok_or(ConfigError::Invalid {
                        key: SEED_DEMO_USER_KEY,
                        value,
                    })?;
                }
                other => tracing::debug!(key = other, "Ignoring unknown configuration key"),
            }
        }

        Ok(config)
    }
}

fn write_default_file(path: &Path) -> Result<(), ConfigError> {
    let contents = format!("{}={}\n", DATABASE_FILE_KEY, DEFAULT_DATABASE_FILE);
    fs::write(path, contents).map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    Io(String),

    #[error("Malformed configuration: {0}")]
    Parse(String),

    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}
