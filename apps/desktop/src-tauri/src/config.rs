//! # Application Configuration
//!
//! Settings read once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FUMO_DB_PATH=/tmp/fumo.sqlite                                      │
//! │     FUMO_REPOSITORY="Sample Repository"                                │
//! │     FUMO_SAMPLE_SIZE=250                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/fumo-repository/fumo.toml (Linux)                        │
//! │     ~/Library/Application Support/com.fumo.repository/fumo.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # fumo.toml
//! database_path = "/var/lib/fumo/fumo.sqlite"
//! default_repository = "Fumo Repository"
//! sample_size = 100
//! ```

use directories::ProjectDirs;
use fumo_core::{FUMO_REPOSITORY_NAME, SAMPLE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "fumo.toml";
const DATABASE_FILE: &str = "fumo.sqlite";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`AppConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but are unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Name of the repository selected when the UI opens.
    pub default_repository: String,

    /// Number of rows the sample repository starts with.
    pub sample_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            default_repository: FUMO_REPOSITORY_NAME.to_string(),
            sample_size: SAMPLE_SIZE,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`fumo.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_repository.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_repository must not be empty".into(),
            ));
        }

        if let Some(path) = &self.database_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("database_path must not be empty".into()));
            }
        }

        Ok(())
    }

    /// Resolves the database file, falling back to the platform data dir.
    pub fn resolve_database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs()
            .ok_or_else(|| ConfigError::Invalid("Could not determine app data directory".into()))?;

        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `FUMO_*` overrides from `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("FUMO_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("FUMO_REPOSITORY") {
            debug!(repository = %name, "Overriding default repository from environment");
            self.default_repository = name;
        }

        if let Some(size) = lookup("FUMO_SAMPLE_SIZE") {
            match size.parse::<usize>() {
                Ok(n) => self.sample_size = n,
                Err(_) => warn!(value = %size, "Ignoring non-numeric FUMO_SAMPLE_SIZE"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "fumo", "repository")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.default_repository, "Fumo Repository");
        assert_eq!(config.sample_size, 100);
        assert!(config.database_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "default_repository = \"Sample Repository\"\nsample_size = 7\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(path)).unwrap();
        assert_eq!(config.default_repository, "Sample Repository");
        assert_eq!(config.sample_size, 7);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.sample_size, AppConfig::default().sample_size);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "sample_size = \"lots\"").unwrap();

        assert!(matches!(
            AppConfig::load(Some(path.clone())),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(AppConfig::load_or_default(Some(path)).sample_size, 100);
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[
            ("FUMO_DB_PATH", "/tmp/x.sqlite"),
            ("FUMO_REPOSITORY", "Sample Repository"),
            ("FUMO_SAMPLE_SIZE", "12"),
        ]));

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/x.sqlite")));
        assert_eq!(config.default_repository, "Sample Repository");
        assert_eq!(config.sample_size, 12);
    }

    #[test]
    fn test_bad_sample_size_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[("FUMO_SAMPLE_SIZE", "many")]));
        assert_eq!(config.sample_size, 100);
    }

    #[test]
    fn test_empty_repository_name_is_invalid() {
        let config = AppConfig {
            default_repository: "  ".into(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("./db/fumo.sqlite")),
            ..AppConfig::default()
        };
        assert_eq!(
            config.resolve_database_path().unwrap(),
            PathBuf::from("./db/fumo.sqlite")
        );
    }
}
