//! Conventional Commits parser.
//!
//! Splits a commit subject of the form `type(scope, scope): description`
//! into a [`ConventionalCommit`].

use std::sync::LazyLock;

use chronicle_commit::{Commit, CommitType, ConventionalCommit};
use regex::Regex;
use thiserror::Error;
use tracing::trace;

static CONVENTIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?<type>.+?)(?:\((?<scope>.+)\))?:\s?(?<subject>.+)$")
        .expect("invalid regex")
});

/// A commit subject that does not follow the `type: description` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a conventional commit subject: {subject:?}")]
pub struct SubjectParseError {
    /// The subject that failed to parse.
    pub subject: String,
}

/// Result type for subject parsing.
pub type SubjectResult<T> = Result<T, SubjectParseError>;

/// Conventional Commits parser.
///
/// An unrecognized type is not an error: it is classified as
/// [`CommitType::Unknown`]. Only a subject without the colon-delimited
/// structure is rejected.
#[derive(Debug, Clone, Copy)]
pub struct ConventionalCommitParser;

impl ConventionalCommitParser {
    /// Creates a new conventional parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parses the subject of `commit`.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectParseError`] if the subject has no `type: description`
    /// structure.
    pub fn parse(&self, commit: &Commit) -> SubjectResult<ConventionalCommit> {
        let error = || SubjectParseError {
            subject: commit.subject.clone(),
        };

        let captures = CONVENTIONAL_RE.captures(&commit.subject).ok_or_else(error)?;
        let commit_type = captures.name("type").ok_or_else(error)?.as_str();
        let description = captures.name("subject").ok_or_else(error)?.as_str();
        let scope = captures
            .name("scope")
            .map(|m| split_scope(m.as_str()))
            .unwrap_or_default();

        trace!(
            hash = %commit.abbreviated_hash,
            commit_type,
            ?scope,
            "parsed conventional commit"
        );

        Ok(ConventionalCommit::new(
            CommitType::from_token(commit_type),
            scope,
            description,
            commit.clone(),
        ))
    }
}

impl Default for ConventionalCommitParser {
    fn default() -> Self {
        Self::new()
    }
}

fn split_scope(scope: &str) -> Vec<String> {
    scope
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
