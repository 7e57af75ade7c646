//! Git error types.

use std::path::PathBuf;

use thiserror::Error;

/// A log line that does not match the `<timestamp> <hash> <refs> | <subject>`
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed log line: {line:?}")]
pub struct LineParseError {
    /// The offending line.
    pub line: String,
}

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found.
    #[error("repository not found at {0}")]
    RepoNotFound(PathBuf),

    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(PathBuf),

    /// The git executable could not be found.
    #[error("git executable not found: {0}")]
    ExecutableNotFound(PathBuf),

    /// The git executable exited unsuccessfully.
    #[error("git exited with {}: {stderr}", exit_status(.code))]
    CommandFailed {
        /// The exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// A log line could not be parsed.
    #[error(transparent)]
    Parse(#[from] LineParseError),

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;

#[allow(clippy::ref_option)]
fn exit_status(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("status {c}"))
}
