//! Configuration of the settings picker itself
//!
//! This module provides:
//! - The tool's config directory and `config.toml`
//! - Resolution of the schema, settings and state locations
//! - SQLite-backed persistent state (`db`, `state`)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod db;
pub mod state;

pub use state::{SqliteStateStore, StateStore};

use crate::settings::layered::WORKSPACE_DIR_NAME;

const APP_DIR_NAME: &str = "settings-picker";

/// Contents of `config.toml`; every field is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// Schema document describing the available settings
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
    /// Global (user) settings file
    #[serde(default)]
    pub user_settings_path: Option<PathBuf>,
    /// Workspace root whose settings override the global ones
    #[serde(default)]
    pub workspace_dir: Option<PathBuf>,
    /// SQLite database holding picker state
    #[serde(default)]
    pub state_db_path: Option<PathBuf>,
}

/// Locations given on the command line, overriding `config.toml`
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub schema_path: Option<PathBuf>,
    pub user_settings_path: Option<PathBuf>,
    pub workspace_dir: Option<PathBuf>,
}

/// Fully resolved locations
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPaths {
    pub schema_path: PathBuf,
    pub user_settings_path: PathBuf,
    pub workspace_dir: Option<PathBuf>,
    pub state_db_path: PathBuf,
}

impl AppConfig {
    /// Get the tool's config directory, creating it if needed
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join(APP_DIR_NAME)
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(format!(".{}", APP_DIR_NAME))
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            log::info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir)
    }

    /// Load `config.toml` from the config directory
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join("config.toml");
        Self::load_from(&config_path)
    }

    /// Load a config file, falling back to defaults if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        log::debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            log::info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    /// Resolve every location: command line, then `config.toml`, then defaults
    ///
    /// A workspace is also picked up from `current_dir` when it contains a
    /// settings directory.
    pub fn resolve(
        &self,
        overrides: &PathOverrides,
        config_dir: &Path,
        current_dir: &Path,
    ) -> ResolvedPaths {
        let workspace_dir = overrides
            .workspace_dir
            .clone()
            .or_else(|| self.workspace_dir.clone())
            .or_else(|| {
                current_dir
                    .join(WORKSPACE_DIR_NAME)
                    .is_dir()
                    .then(|| current_dir.to_path_buf())
            });

        ResolvedPaths {
            schema_path: overrides
                .schema_path
                .clone()
                .or_else(|| self.schema_path.clone())
                .unwrap_or_else(|| config_dir.join("schema.json")),
            user_settings_path: overrides
                .user_settings_path
                .clone()
                .or_else(|| self.user_settings_path.clone())
                .unwrap_or_else(|| config_dir.join("settings.json")),
            workspace_dir,
            state_db_path: self
                .state_db_path
                .clone()
                .unwrap_or_else(|| config_dir.join("state.db")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "schema_path = \"/etc/schema.json\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.schema_path, Some(PathBuf::from("/etc/schema.json")));
        assert_eq!(config.user_settings_path, None);
    }

    #[test]
    fn test_resolution_precedence() {
        let config_dir = tempfile::tempdir().unwrap();
        let cwd = tempfile::tempdir().unwrap();
        let config = AppConfig {
            schema_path: Some(PathBuf::from("/from/config.json")),
            user_settings_path: Some(PathBuf::from("/from/settings.json")),
            ..Default::default()
        };
        let overrides = PathOverrides {
            schema_path: Some(PathBuf::from("/from/cli.json")),
            ..Default::default()
        };

        let paths = config.resolve(&overrides, config_dir.path(), cwd.path());
        assert_eq!(paths.schema_path, PathBuf::from("/from/cli.json"));
        assert_eq!(paths.user_settings_path, PathBuf::from("/from/settings.json"));
        assert_eq!(paths.state_db_path, config_dir.path().join("state.db"));
        assert_eq!(paths.workspace_dir, None);
    }

    #[test]
    fn test_workspace_detected_from_current_dir() {
        let config_dir = tempfile::tempdir().unwrap();
        let cwd = tempfile::tempdir().unwrap();
        fs::create_dir(cwd.path().join(WORKSPACE_DIR_NAME)).unwrap();

        let paths = AppConfig::default().resolve(
            &PathOverrides::default(),
            config_dir.path(),
            cwd.path(),
        );
        assert_eq!(paths.workspace_dir, Some(cwd.path().to_path_buf()));
    }
}
