//! Global evcal configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use crate::error::{EvcalError, EvcalResult};
use crate::storage::{DEFAULT_STORAGE_KEY, FileStorage};

static DEFAULT_DATA_DIR: &str = "~/.local/share/evcal";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// Configuration at ~/.config/evcal/config.toml
#[derive(Debug, Deserialize, Clone)]
pub struct EvcalConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for EvcalConfig {
    fn default() -> Self {
        EvcalConfig {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

impl EvcalConfig {
    pub fn config_path() -> EvcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EvcalError::Config("Could not determine config directory".into()))?
            .join("evcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, writing a commented default one first if none exists.
    pub fn load() -> EvcalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> EvcalResult<Self> {
        let config: EvcalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| EvcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EvcalError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), data_dir = %config.data_dir.display(), "loaded config");
        Ok(config)
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.data_path())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EvcalResult<()> {
        let contents = format!(
            "\
# evcal configuration

# Where your events are stored:
# data_dir = \"{}\"

# Name of the storage entry holding the event list:
# storage_key = \"{}\"
",
            DEFAULT_DATA_DIR, DEFAULT_STORAGE_KEY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EvcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EvcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_loads_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("evcal").join("config.toml");

        EvcalConfig::create_default_config(&path).unwrap();
        let config = EvcalConfig::load_from(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.storage_key, "events");
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = EvcalConfig::load_from(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.storage_key, "events");
    }

    #[test]
    fn test_load_set_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            format!(
                "data_dir = '{}'\nstorage_key = \"work\"\n",
                tmp.path().join("data").display()
            ),
        )
        .unwrap();

        let loaded = EvcalConfig::load_from(&path).unwrap();
        assert_eq!(loaded.data_dir, tmp.path().join("data"));
        assert_eq!(loaded.storage_key, "work");
        assert_eq!(loaded.data_path(), tmp.path().join("data"));
    }

    #[test]
    fn test_data_path_expands_tilde() {
        let config = EvcalConfig::default();
        assert!(!config.data_path().to_string_lossy().starts_with('~'));
    }
}
