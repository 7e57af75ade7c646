//! Commit types for Chronicle.
//!
//! This crate provides the value types shared by every stage of Chronicle:
//! - [`Commit`]: A commit as read from one line of the Git log
//! - [`ConventionalCommit`]: A commit after its subject has been classified

mod commit;
mod conventional;

pub use commit::{Author, Commit, Tag};
pub use conventional::{CommitType, ConventionalCommit};
