//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment variables, then command-line flags (applied by the CLI).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::services::equipment_registry::EquipmentEntry;
use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, ENV_CACHE_DIR, ENV_USER_ID, SESSION_FILE_NAME,
};
use crate::{Error, Result};

/// Log levels accepted in `[logging] level`
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub identity: IdentityConfig,
    pub source: SourceConfig,
    pub logging: LoggingConfig,
    /// Extra equipment rows merged over the built-in table
    pub equipment: Vec<EquipmentEntry>,
}

/// Per-week event cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding one JSON file per cached week
    pub directory: PathBuf,

    /// Persist events to disk; when false an in-memory cache is used
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME),
            enabled: true,
        }
    }
}

/// Caller identity settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Session file standing in for the host session; defaults to
    /// `current_user.json` inside the cache directory
    pub session_file: Option<PathBuf>,

    /// User id used when no session is available
    pub fallback_user_id: Option<String>,
}

/// Native calendar settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// JSON dump of native events queried as the host calendar
    pub native_calendar_file: Option<PathBuf>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default configuration file location
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("No configuration directory on this platform"))
    }

    /// Read a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults, overlaid by `config_file` if given, then by the environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_CACHE_DIR).filter(|v| !v.trim().is_empty()) {
            debug!("Cache directory overridden by {}", ENV_CACHE_DIR);
            self.cache.directory = PathBuf::from(dir);
        }
        if let Some(user_id) = lookup(ENV_USER_ID).filter(|v| !v.trim().is_empty()) {
            debug!("Fallback user id overridden by {}", ENV_USER_ID);
            self.identity.fallback_user_id = Some(user_id);
        }
    }

    /// Session file path, resolved against the cache directory by default
    pub fn session_file(&self) -> PathBuf {
        self.identity
            .session_file
            .clone()
            .unwrap_or_else(|| self.cache.directory.join(SESSION_FILE_NAME))
    }

    /// Validate the assembled configuration
    pub fn validate(&self) -> Result<()> {
        if self.cache.directory.as_os_str().is_empty() {
            return Err(Error::configuration("Cache directory must not be empty"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(Error::configuration(format!(
                "Unknown log level '{}' (expected one of: {})",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        if let Some(entry) = self.equipment.iter().find(|e| e.code.trim().is_empty()) {
            return Err(Error::configuration(format!(
                "Equipment entry '{}' has an empty code",
                entry.name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.cache.enabled);
        assert!(config.cache.directory.ends_with(APP_DIR_NAME));
        assert_eq!(config.logging.level, "warn");
        assert!(config.equipment.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[cache]
directory = "/tmp/weekly-events"

[identity]
fallback_user_id = "338782"

[[equipment]]
code = "3100"
id = "31"
display_name = "圧延"
name = "圧延設備"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.cache.directory, PathBuf::from("/tmp/weekly-events"));
        assert!(config.cache.enabled);
        assert_eq!(config.identity.fallback_user_id.as_deref(), Some("338782"));
        assert_eq!(config.equipment.len(), 1);
        assert_eq!(config.equipment[0].display_name, "圧延");
        assert_eq!(
            config.session_file(),
            PathBuf::from("/tmp/weekly-events/current_user.json")
        );
    }

    #[test]
    fn test_invalid_toml_is_a_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[cache\ndirectory = 1").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_CACHE_DIR, "/var/cache/ingest"),
            (ENV_USER_ID, "u-7"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.cache.directory, PathBuf::from("/var/cache/ingest"));
        assert_eq!(config.identity.fallback_user_id.as_deref(), Some("u-7"));
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = Config::default();
        let before = config.clone();
        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config, before);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = Config::default();
        config.cache.directory = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.equipment.push(EquipmentEntry {
            code: " ".to_string(),
            id: "1".to_string(),
            display_name: "x".to_string(),
            name: "x".to_string(),
        });
        assert!(config.validate().is_err());
    }
}
