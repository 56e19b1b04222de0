use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::repository::file::default_data_dir;
use crate::service::scoring::Weights;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    weights: WeightsFileConfig,
    storage: StorageFileConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WeightsFileConfig {
    importance: Option<i64>,
    priority: Option<i64>,
    due: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_dir: Option<PathBuf>,
    remote_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub remote_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub weights: Weights,
    pub data_dir: PathBuf,
    pub remote_dir: PathBuf,
}

impl Config {
    /// A missing default file means defaults; a missing explicit file is an error.
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = load_config_file(overrides.config_path.as_deref())?;
        Self::resolve(overrides, &file, default_data_dir())
    }

    fn resolve(
        overrides: &Overrides,
        file: &ConfigFile,
        fallback_data_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let defaults = Weights::default();
        let weights = Weights {
            importance: file.weights.importance.unwrap_or(defaults.importance),
            priority: file.weights.priority.unwrap_or(defaults.priority),
            due: file.weights.due.unwrap_or(defaults.due),
        };

        let data_dir = overrides
            .data_dir
            .clone()
            .or_else(|| file.storage.data_dir.clone())
            .or(fallback_data_dir)
            .ok_or(ConfigError::NoDataDir)?;
        let remote_dir = overrides
            .remote_dir
            .clone()
            .or_else(|| file.storage.remote_dir.clone())
            .unwrap_or_else(|| data_dir.join("remote"));

        Ok(Self {
            weights,
            data_dir,
            remote_dir,
        })
    }
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(path) = explicit_path {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    let path = config_dir.join("smarttasks").join("config.toml");

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
