//! Configuration module for dayplan.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dayplan_notify::NotifyConfig;
use serde::Deserialize;

const APP_DIR: &str = "dayplan";
const CONFIG_FILE: &str = "config.toml";
const DATA_FILE: &str = "tasks.json";

/// Top-level configuration loaded from `config.toml`.
///
/// Every field is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the task snapshot lives (defaults to the platform data dir).
    pub data_file: Option<PathBuf>,
    /// Reminder delivery settings.
    pub notify: NotifyConfig,
}

impl AppConfig {
    /// Load the configuration from the default path.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load the configuration from `path`.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolve the tasks file path, `override_path` taking precedence
    /// over the configured one.
    ///
    /// # Errors
    /// Returns an error when no data directory can be determined.
    pub fn resolve_data_file(&self, override_path: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = override_path {
            return Ok(path);
        }
        if let Some(path) = &self.data_file {
            return Ok(path.clone());
        }

        let dir = dirs::data_dir().context("Could not determine data directory")?;
        Ok(dir.join(APP_DIR).join(DATA_FILE))
    }
}

/// Returns the default configuration file path.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = AppConfig::from_path(&dir.path().join("config.toml")).unwrap();

        assert!(config.data_file.is_none());
        assert!(config.notify.enabled);
        assert!(config.notify.command.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
data_file = "/tmp/my-tasks.json"

[notify]
command = "/usr/local/bin/dayplan-notifyd"
args = ["--quiet"]
"#,
        )
        .unwrap();

        let config = AppConfig::from_path(&path).unwrap();

        assert_eq!(
            config.data_file.as_deref(),
            Some(Path::new("/tmp/my-tasks.json"))
        );
        assert_eq!(
            config.notify.command.as_deref(),
            Some(Path::new("/usr/local/bin/dayplan-notifyd"))
        );
        assert_eq!(config.notify.args, vec!["--quiet"]);
        assert_eq!(config.notify.timeout, 10);
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_file = [").unwrap();

        assert!(AppConfig::from_path(&path).is_err());
    }

    #[test]
    fn override_beats_the_configured_path() {
        let config = AppConfig {
            data_file: Some(PathBuf::from("/tmp/configured.json")),
            ..AppConfig::default()
        };

        let resolved = config
            .resolve_data_file(Some(PathBuf::from("/tmp/override.json")))
            .unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/override.json"));

        let resolved = config.resolve_data_file(None).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/configured.json"));
    }

    #[test]
    fn default_config_path_ends_with_the_app_dir() {
        if let Some(path) = default_config_path() {
            assert!(path.to_string_lossy().contains("dayplan"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
