//! Configuration management for Chronicle.
//!
//! This crate handles loading the `chronicle.toml` configuration file.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_FILE_NAME, find_and_load_config_from, load_config, load_or_default};
pub use schema::{ChangelogConfig, Config, GitBackend, GitConfig, VersionConfig};
