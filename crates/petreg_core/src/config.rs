//! Runtime configuration.
//!
//! Resolution order per setting: explicit override, then environment
//! (`PETREG_DATA_PATH`, `PETREG_LOG_LEVEL`, `PETREG_LOG_DIR`), then default.
//! Blank values count as unset.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DATA_PATH_ENV: &str = "PETREG_DATA_PATH";
pub const LOG_LEVEL_ENV: &str = "PETREG_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PETREG_LOG_DIR";

const DEFAULT_DATA_FILE_NAME: &str = "petreg.sqlite3";

/// Values supplied by the caller, e.g. command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub data_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

/// Effective configuration for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// SQLite store file.
    pub data_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is off when `None`.
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLogLevel(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLogLevel(err) => Some(err),
        }
    }
}

impl RegistryConfig {
    /// Resolves against the process environment.
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |name| std::env::var(name).ok())
    }

    /// Resolves against an arbitrary variable lookup.
    pub fn resolve(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let env = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_path = overrides
            .data_path
            .or_else(|| env(DATA_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DATA_FILE_NAME));

        let log_level = match overrides.log_level.or_else(|| env(LOG_LEVEL_ENV)) {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let log_dir = overrides
            .log_dir
            .or_else(|| env(LOG_DIR_ENV).map(PathBuf::from));

        Ok(Self {
            data_path,
            log_level,
            log_dir,
        })
    }
}
