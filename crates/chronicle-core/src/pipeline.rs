//! Log to changelog pipeline.

use chronicle_commit::Commit;
use chronicle_conventional::ConventionalCommitParser;
use chronicle_git::LogSource;
use tracing::info;

use crate::{Changelog, CoreResult};

/// Reads commits from a log source and classifies them.
pub struct Pipeline {
    source: Box<dyn LogSource>,
    parser: ConventionalCommitParser,
}

impl Pipeline {
    /// Creates a new pipeline reading from `source`.
    #[must_use]
    pub fn new(source: Box<dyn LogSource>) -> Self {
        Self {
            source,
            parser: ConventionalCommitParser::new(),
        }
    }

    /// Reads and parses the whole log, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read or any line is malformed.
    pub fn commits(&self) -> CoreResult<Vec<Commit>> {
        let commits = self.source.commits()?;
        info!(count = commits.len(), "read commits");
        Ok(commits)
    }

    /// Returns the parser used to classify subjects.
    pub fn parser(&self) -> &ConventionalCommitParser {
        &self.parser
    }

    /// Reads the log and groups it into releases.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read or any line is malformed.
    pub fn changelog(&self, tag_prefix: &str) -> CoreResult<Changelog> {
        let commits = self.commits()?;
        Ok(Changelog::build(&commits, tag_prefix, &self.parser))
    }
}
