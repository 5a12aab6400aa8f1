//! Runtime configuration.
//!
//! One JSON file in the user config dir (overridable with `--config`).
//! The `theme` field doubles as the persisted preference: it is written
//! back whenever the user issues a theme change.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme name. Persisted on every `theme <name>` command.
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Directory holding index.json, the collection files and resume.json.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Lines scrolled per Up/Down on the resume page.
    #[serde(default = "default_scroll_step")]
    pub scroll_step: usize,

    #[serde(default = "default_github_url")]
    pub github_url: String,

    /// Where `export` writes the resume. Defaults to ./resume.txt.
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

fn default_theme_name() -> String {
    "dark".to_string()
}

fn default_scroll_step() -> usize {
    2
}

fn default_github_url() -> String {
    "https://github.com/termfolio".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            data_dir: None,
            scroll_step: default_scroll_step(),
            github_url: default_github_url(),
            export_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save configuration to a JSON file, creating parent dirs as needed.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|source| ConfigError::Serialize { source })?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The default config file location (~/.config/termfolio/config.json).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("termfolio").join("config.json"))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not serialize config: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
    #[error("could not write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.scroll_step, 2);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{ "theme": "matrix" }"#).unwrap();
        assert_eq!(config.theme, "matrix");
        assert_eq!(config.scroll_step, 2);
    }

    #[test]
    fn test_config_save_load_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.theme = "light".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.theme, "light");
        assert_eq!(loaded.github_url, config.github_url);
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = Config::load_from_file("/nonexistent/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
