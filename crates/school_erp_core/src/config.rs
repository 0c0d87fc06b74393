//! Startup configuration.
//!
//! # Responsibility
//! - Resolve the store path and logging settings for process startup.
//!
//! # Invariants
//! - Every setting has a default; overrides come only from environment
//!   variables (there are no command-line flags).
//! - Blank overrides are ignored.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Store file used when `SCHOOL_ERP_DB` is unset.
pub const DEFAULT_DB_FILE_NAME: &str = "school_erp.sqlite3";

pub const ENV_DB_PATH: &str = "SCHOOL_ERP_DB";
pub const ENV_LOG_LEVEL: &str = "SCHOOL_ERP_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SCHOOL_ERP_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging is skipped when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(ENV_DB_PATH).map_or(defaults.db_path, PathBuf::from),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DEFAULT_DB_FILE_NAME, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply_without_overrides() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.log_dir, None);
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn overrides_replace_defaults_and_blank_values_are_ignored() {
        let env = HashMap::from([
            (ENV_DB_PATH, "/var/lib/school/erp.db"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_LOG_DIR, "   "),
        ]);
        let config = AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.db_path, PathBuf::from("/var/lib/school/erp.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }
}
