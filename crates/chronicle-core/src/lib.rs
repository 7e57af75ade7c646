//! Core library for Chronicle.
//!
//! This crate provides semantic version parsing and precedence, and the
//! orchestration turning a commit log into an ordered changelog.

mod changelog;
mod error;
mod pipeline;
mod version;
mod version_parser;

pub use changelog::{Changelog, ChangelogOptions, Release};
pub use error::{CoreError, CoreResult};
pub use pipeline::Pipeline;
pub use version::{PreRelease, PreReleaseType, SemanticVersion, VersionError, VersionResult};
pub use version_parser::SemanticVersionParser;
