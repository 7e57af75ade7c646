//! Commit classified under the conventional-commit grammar.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Commit;

/// The change category of a conventional commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    /// A bug fix (`fix`).
    Fix,
    /// A new feature (`feat`).
    Feat,
    /// Any other type (`chore`, `docs`, ...).
    Unknown,
}

impl CommitType {
    /// Classifies a raw type token, ignoring case.
    ///
    /// Unrecognized tokens map to [`CommitType::Unknown`].
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "fix" => Self::Fix,
            "feat" => Self::Feat,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fix => f.write_str("fix"),
            Self::Feat => f.write_str("feat"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// A commit whose subject has been split into type, scope and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionalCommit {
    /// The commit this was parsed from.
    pub original_commit: Commit,

    /// The classified commit type.
    pub commit_type: CommitType,

    /// The scopes, in the order they were written. Empty when absent.
    pub scope: Vec<String>,

    /// The description, without the type and scope prefix.
    pub subject: String,
}

impl ConventionalCommit {
    /// Creates a new conventional commit.
    #[must_use]
    pub fn new(
        commit_type: CommitType,
        scope: Vec<String>,
        subject: impl Into<String>,
        original_commit: Commit,
    ) -> Self {
        Self {
            original_commit,
            commit_type,
            scope,
            subject: subject.into(),
        }
    }

    /// Returns the abbreviated hash of the original commit.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.original_commit.abbreviated_hash
    }
}
