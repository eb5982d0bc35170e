use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::SettingsDefaults;
use crate::error::{Error, Result};

pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Values used when the Settings record is first created.
    pub defaults: SettingsDefaults,
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    #[serde(default)]
    defaults: SettingsDefaults,
}

impl AppConfig {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            defaults: SettingsDefaults::default(),
        }
    }

    /// Parses a TOML config. An explicit `data_dir` wins over the file's,
    /// which wins over [`DEFAULT_DATA_DIR`].
    pub fn from_toml(contents: &str, data_dir: Option<PathBuf>) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;

        let config = Self {
            data_dir: data_dir
                .or(file.data_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            defaults: file.defaults,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path, data_dir: Option<PathBuf>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents, data_dir)
    }

    pub fn validate(&self) -> Result<()> {
        if self.defaults.edge_agent_checkin_interval == 0 {
            return Err(Error::Config(
                "edge_agent_checkin_interval must be greater than zero".to_string(),
            ));
        }
        if self.defaults.templates_url.trim().is_empty() {
            return Err(Error::Config("templates_url cannot be empty".to_string()));
        }
        if self.defaults.user_session_timeout.trim().is_empty() {
            return Err(Error::Config(
                "user_session_timeout cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("berth.db")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
