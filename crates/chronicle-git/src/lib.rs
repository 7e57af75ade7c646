//! Git abstraction layer for Chronicle.
//!
//! This crate provides:
//! - The log line parser turning `%at %h %D | %s` lines into [`Commit`]s
//! - The [`LogSource`] trait and its implementations (the `git` executable,
//!   libgit2, and an in-memory log)
//!
//! [`Commit`]: chronicle_commit::Commit

mod cli;
mod error;
mod log_parser;
mod repository;
mod source;

pub use cli::{GitCli, LOG_FORMAT};
pub use error::{GitError, GitResult, LineParseError};
pub use log_parser::{parse_log, parse_log_line};
pub use repository::Repository;
pub use source::{LogSource, StaticLog};
