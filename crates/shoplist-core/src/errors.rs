//! Error types for the shopping list domain and its collaborators
//!
//! Two layers are kept apart. [`ShoppingListError`] covers everything the
//! domain core can reject: a raw value that fails its constraints, an item
//! that is already in the list, a full list, or a slot index outside the
//! list. [`AppError`] wraps those and adds the failures of the code around
//! the core (files, HTTP, credentials, configuration).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShoppingListError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("Item '{name}' by '{manufacturer}' is already in the list")]
    DuplicateItem { name: String, manufacturer: String },
    #[error("The shopping list is full (max {max} items)")]
    Capacity { max: usize },
    #[error("Index {index} is out of range for a list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ShoppingListError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        ShoppingListError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] ShoppingListError),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("{0}")]
    Auth(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Http(err.to_string())
    }
}
