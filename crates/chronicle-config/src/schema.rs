//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log source configuration.
    #[serde(default)]
    pub git: GitConfig,

    /// Version configuration.
    #[serde(default)]
    pub version: VersionConfig,

    /// Changelog configuration.
    #[serde(default)]
    pub changelog: ChangelogConfig,
}

impl Config {
    /// Checks values that TOML typing alone cannot enforce.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.git.executable.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "git.executable must not be empty".to_string(),
            ));
        }
        if self.changelog.output.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "changelog.output must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the commit log is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// Run the `git` executable.
    #[default]
    Cli,
    /// Read the repository through libgit2.
    Libgit2,
}

/// Log source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitConfig {
    /// Backend used to read the log.
    #[serde(default)]
    pub backend: GitBackend,

    /// Git executable, a bare name looked up on `PATH` or a path.
    #[serde(default = "default_executable")]
    pub executable: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            backend: GitBackend::default(),
            executable: default_executable(),
        }
    }
}

fn default_executable() -> String {
    "git".to_string()
}

/// Version configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConfig {
    /// Tag prefix (e.g., "v").
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            tag_prefix: default_tag_prefix(),
        }
    }
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

/// Changelog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Output file path, relative to the repository.
    #[serde(default = "default_changelog_output")]
    pub output: String,

    /// Include commits that are neither features nor fixes.
    #[serde(default)]
    pub include_unknown: bool,

    /// Append abbreviated hashes to entries.
    #[serde(default = "default_true")]
    pub include_hashes: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            output: default_changelog_output(),
            include_unknown: false,
            include_hashes: true,
        }
    }
}

fn default_changelog_output() -> String {
    "CHANGELOG.md".to_string()
}

fn default_true() -> bool {
    true
}
