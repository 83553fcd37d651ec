//! Configuration type definitions
//!
//! Every section and field has a serde default, so an empty YAML document
//! (or no file at all) yields a working file-backed setup.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the shopping list lives between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Delimiter-separated text file on local disk.
    #[default]
    File,
    /// Remote HTTP API, also used for authentication.
    Remote,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Remote => write!(f, "remote"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "remote" => Ok(StorageBackend::Remote),
            other => Err(AppError::Config(format!(
                "Unknown storage backend '{}', expected 'file' or 'remote'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_file")]
    pub path: PathBuf,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("shoppingList.csv")
}

fn default_delimiter() -> String {
    ";".to_string()
}

fn default_api_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("shoplist.log")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_data_file(),
            delimiter: default_delimiter(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl StorageConfig {
    /// The delimiter as a single byte. Only meaningful after
    /// [`ShopConfig::validate`] has passed.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.bytes().next().unwrap_or(b';')
    }
}

impl ShopConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut chars = self.storage.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() && !matches!(c, '"' | '\n' | '\r') => {}
            _ => {
                return Err(AppError::Config(format!(
                    "storage.delimiter must be a single ASCII character other than a quote or newline, got {:?}",
                    self.storage.delimiter
                )))
            }
        }

        if self.storage.path.as_os_str().is_empty() {
            return Err(AppError::Config("storage.path must not be empty".to_string()));
        }

        if self.api.timeout_seconds == 0 {
            return Err(AppError::Config(
                "api.timeout_seconds must be greater than zero".to_string(),
            ));
        }

        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "api.base_url must start with http:// or https://, got '{}'",
                self.api.base_url
            )));
        }

        Ok(())
    }
}
