//! Application configuration
//!
//! A small YAML document selects the storage backend, the remote API and the
//! log destination. Environment variables and command line flags can
//! override individual values.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
