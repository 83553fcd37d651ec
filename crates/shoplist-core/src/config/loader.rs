//! Configuration loader for YAML files and environment overrides

use crate::config::types::*;
use crate::errors::AppError;
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const CONFIG_FILE_NAME: &str = "shoplist.yaml";

pub const ENV_API_URL: &str = "SHOPLIST_API_URL";
pub const ENV_DATA_FILE: &str = "SHOPLIST_DATA_FILE";
pub const ENV_BACKEND: &str = "SHOPLIST_BACKEND";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from `explicit` if given, else the first of `./shoplist.yaml` and
    /// `<config dir>/shoplist/shoplist.yaml` that exists, else defaults.
    pub async fn discover(explicit: Option<&Path>) -> Result<ShopConfig, AppError> {
        if let Some(path) = explicit {
            return Self::from_file(path).await;
        }

        for candidate in Self::candidate_paths() {
            if candidate.exists() {
                log::debug!("Using configuration file {}", candidate.display());
                return Self::from_file(&candidate).await;
            }
        }

        log::debug!("No configuration file found, using defaults");
        let mut config = ShopConfig::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("shoplist").join(CONFIG_FILE_NAME));
        }
        paths
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<ShopConfig, AppError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).await.map_err(|e| {
            AppError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_str(&content)
    }

    /// Parse YAML, apply environment overrides and validate.
    pub fn from_str(content: &str) -> Result<ShopConfig, AppError> {
        let mut config: ShopConfig = if content.trim().is_empty() {
            ShopConfig::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| AppError::Config(format!("Failed to parse YAML config: {}", e)))?
        };

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    fn apply_env_overrides(config: &mut ShopConfig) -> Result<(), AppError> {
        if let Ok(url) = env::var(ENV_API_URL) {
            log::debug!("{} overrides api.base_url", ENV_API_URL);
            config.api.base_url = url;
        }
        if let Ok(path) = env::var(ENV_DATA_FILE) {
            log::debug!("{} overrides storage.path", ENV_DATA_FILE);
            config.storage.path = PathBuf::from(path);
        }
        if let Ok(backend) = env::var(ENV_BACKEND) {
            log::debug!("{} overrides storage.backend", ENV_BACKEND);
            config.storage.backend = backend.parse()?;
        }
        Ok(())
    }
}
