//! Application configuration
//!
//! Loaded from TOML (default `~/.config/tariff-lookup/config.toml`).
//! Every section and field is optional; missing values fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::infrastructure::DatabaseConfig;
use crate::shared::errors::InfraError;

pub const CONFIG_ENV_VAR: &str = "TARIFF_LOOKUP_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub database: DatabaseSection,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error (RUST_LOG takes precedence)
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DatabaseConfig::default().url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// JSON array of tariff records served by the local search provider
    pub dataset_path: Option<PathBuf>,
    /// Upper bound on parallel ancestor lookups per query
    pub max_concurrent_lookups: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            max_concurrent_lookups: 8,
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, InfraError> {
        let mut config: AppConfig = toml::from_str(raw)?;
        config.search.max_concurrent_lookups = config.search.max_concurrent_lookups.max(1);
        Ok(config)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
        }
    }
}

/// `$TARIFF_LOOKUP_CONFIG`, else `~/.config/tariff-lookup/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tariff-lookup")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.search.max_concurrent_lookups, 8);
    }

    #[test]
    fn sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [logging]
            level = "debug"
            json = true

            [database]
            url = "sqlite::memory:"

            [search]
            dataset_path = "/data/hts.json"
            max_concurrent_lookups = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.database_config().url, "sqlite::memory:");
        assert_eq!(config.search.dataset_path, Some(PathBuf::from("/data/hts.json")));
        // clamped so lookups always make progress
        assert_eq!(config.search.max_concurrent_lookups, 1);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            AppConfig::from_toml("[logging\nlevel = "),
            Err(InfraError::Config(_))
        ));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = AppConfig::load(Path::new("/nonexistent/tariff-lookup.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
