//! Parsing and validation of `sift.toml` logger configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`SiftConfig`] holding the logger's verbosity settings and the project's
//! warning-suppression properties.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
