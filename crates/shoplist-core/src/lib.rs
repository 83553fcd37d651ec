//! Core of the shoplist console application.
//!
//! The crate is split into a pure domain layer and the collaborators that
//! surround it:
//!
//! - **Domain**: validated value types, Smartphone/Computer products and the
//!   bounded, duplicate-free [`ShoppingList`]
//! - **Storage**: delimited text file and HTTP API backends behind
//!   [`ListStore`]
//! - **Authentication**: local and remote sign-in behind [`Authenticator`]
//! - **Configuration**: YAML file with environment overrides

pub mod auth;
pub mod config;
pub mod domain;
pub mod errors;
pub mod storage;

pub use auth::{Authenticator, LocalAuthenticator, RemoteAuthenticator, Session};
pub use config::*;
pub use domain::*;
pub use errors::{AppError, ShoppingListError};
pub use storage::{FileStore, ListRecord, ListStore, RemoteStore};

#[cfg(test)]
pub mod test_utils;
