//! Commit record as read from the Git log.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The author of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    /// The author name.
    pub name: String,

    /// The author email.
    pub email: String,
}

impl Author {
    /// Creates a new author.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// The author attached to every commit read from the log.
    ///
    /// The log line format carries no author identity, so commits are
    /// stamped with this value until the format is extended with
    /// `%an`/`%ae` fields.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new("Unknown", "unknown@localhost")
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// A tag pointing at a commit, exactly as it appears in the ref list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// The tag name (e.g. `v1.10.7`).
    pub name: String,
}

impl Tag {
    /// Creates a new tag.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A commit as read from the Git log, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The abbreviated commit hash.
    pub abbreviated_hash: String,

    /// The commit date, when the log line carries a timestamp.
    pub commit_date: Option<DateTime<Utc>>,

    /// The commit author.
    pub author: Author,

    /// The commit subject (first line of the message).
    pub subject: String,

    /// The first tag pointing at this commit, if any.
    pub tag: Option<Tag>,
}

impl Commit {
    /// Creates a new commit.
    #[must_use]
    pub fn new(
        abbreviated_hash: impl Into<String>,
        commit_date: Option<DateTime<Utc>>,
        author: Author,
        subject: impl Into<String>,
        tag: Option<Tag>,
    ) -> Self {
        Self {
            abbreviated_hash: abbreviated_hash.into(),
            commit_date,
            author,
            subject: subject.into(),
            tag,
        }
    }

    /// Returns the tag name, if this commit is tagged.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.tag.as_ref().map(|t| t.name.as_str())
    }
}
