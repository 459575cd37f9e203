//! Runtime configuration read from `ORDERS_*` environment variables

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const STORAGE_ENV_VAR: &str = "ORDERS_STORAGE";
pub const DATABASE_PATH_ENV_VAR: &str = "ORDERS_DATABASE_PATH";
pub const SEED_ENV_VAR: &str = "ORDERS_SEED";
pub const LOG_ENV_VAR: &str = "ORDERS_LOG";

const DEFAULT_DATABASE_PATH: &str = "orders.db";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown storage backend '{0}' (expected 'memory' or 'sqlite')")]
    UnknownStorage(String),

    #[error("Invalid boolean '{value}' for {variable}")]
    InvalidFlag { variable: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("Invalid log filter '{value}': {reason}")]
    InvalidLogFilter { value: String, reason: String },
}

/// Where entities are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Memory,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err(ConfigError::UnknownStorage(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageBackend,
    /// Only used by the SQLite backend
    pub database_path: PathBuf,
    /// Seed the catalog when the stores are empty
    pub seed: bool,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            storage: StorageBackend::Memory,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            seed: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Build the tracing filter for [`AppConfig::log_filter`]
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_filter).map_err(|e| ConfigError::InvalidLogFilter {
            value: self.log_filter.clone(),
            reason: e.to_string(),
        })
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables fall back to [`AppConfig::default`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(storage) = lookup(STORAGE_ENV_VAR) {
            config.storage = storage.parse()?;
        }

        if let Some(path) = lookup(DATABASE_PATH_ENV_VAR) {
            if path.trim().is_empty() {
                return Err(ConfigError::Empty(DATABASE_PATH_ENV_VAR));
            }
            config.database_path = PathBuf::from(path);
        }

        if let Some(seed) = lookup(SEED_ENV_VAR) {
            config.seed = parse_flag(SEED_ENV_VAR, &seed)?;
        }

        if let Some(filter) = lookup(LOG_ENV_VAR) {
            if filter.trim().is_empty() {
                return Err(ConfigError::Empty(LOG_ENV_VAR));
            }
            if let Err(e) = EnvFilter::try_new(&filter) {
                return Err(ConfigError::InvalidLogFilter {
                    value: filter,
                    reason: e.to_string(),
                });
            }
            config.log_filter = filter;
        }

        Ok(config)
    }
}

fn parse_flag(variable: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            variable,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.seed);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_sqlite_configuration() {
        let config = load(&[
            ("ORDERS_STORAGE", "SQLite"),
            ("ORDERS_DATABASE_PATH", "/tmp/shop.db"),
            ("ORDERS_SEED", "off"),
            ("ORDERS_LOG", "orders=debug"),
        ])
        .unwrap();

        assert_eq!(config.storage, StorageBackend::Sqlite);
        assert_eq!(config.database_path, PathBuf::from("/tmp/shop.db"));
        assert!(!config.seed);
        assert_eq!(config.log_filter, "orders=debug");
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            load(&[("ORDERS_STORAGE", "postgres")]).unwrap_err(),
            ConfigError::UnknownStorage("postgres".to_string())
        );
        assert_eq!(
            load(&[("ORDERS_SEED", "maybe")]).unwrap_err(),
            ConfigError::InvalidFlag {
                variable: "ORDERS_SEED",
                value: "maybe".to_string()
            }
        );
        assert_eq!(
            load(&[("ORDERS_DATABASE_PATH", " ")]).unwrap_err(),
            ConfigError::Empty("ORDERS_DATABASE_PATH")
        );
    }

    #[test]
    fn test_malformed_log_filter_is_rejected() {
        let error = load(&[("ORDERS_LOG", "=[[bad")]).unwrap_err();
        assert!(matches!(
            error,
            ConfigError::InvalidLogFilter { ref value, .. } if value == "=[[bad"
        ));
    }

    #[test]
    fn test_env_filter_from_valid_directive() {
        let config = load(&[("ORDERS_LOG", "warn,orders=debug")]).unwrap();
        assert!(config.env_filter().is_ok());
        assert!(AppConfig::default().env_filter().is_ok());
    }
}
