//! Catalog configuration loading.
//!
//! # Responsibility
//! - Describe where the catalog database lives and how logging is set up.
//! - Load settings from TOML with per-key defaults and env overrides.
//!
//! # Invariants
//! - Absent keys fall back to defaults; unknown keys are rejected.
//! - `COCKTAIL_DB_PATH` overrides `[database] path` when set and non-blank.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::default_log_level;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "COCKTAIL_DB_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite file path. `None` keeps the catalog in memory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files. `None` logs to stderr.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    /// No `[database] path`, `COCKTAIL_DB_PATH` or explicit override was given.
    MissingDatabasePath,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::MissingDatabasePath => write!(
                f,
                "no database path configured; set [database] path or {DB_PATH_ENV}"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::MissingDatabasePath => None,
        }
    }
}

impl CatalogConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(ConfigError::Parse)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Applies environment overrides on top of file/default settings.
    pub fn with_env_overrides(self) -> Self {
        self.with_db_path_override(std::env::var(DB_PATH_ENV).ok())
    }

    fn with_db_path_override(mut self, value: Option<String>) -> Self {
        if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
            self.database.path = Some(PathBuf::from(value.trim()));
        }
        self
    }

    /// Returns the configured database file, for callers that must persist.
    pub fn require_database_path(&self) -> Result<&Path, ConfigError> {
        self.database
            .path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(ConfigError::MissingDatabasePath)
    }

    /// Opens the configured catalog database with migrations applied.
    ///
    /// Without a path the catalog lives in memory and is lost on drop.
    pub fn open_connection(&self) -> DbResult<Connection> {
        match self.database.path.as_ref() {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}
