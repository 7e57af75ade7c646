//! Log sources.

use chronicle_commit::Commit;

use crate::{GitResult, parse_log};

/// Supplies the formatted commit log, one `%at %h %D | %s` line per commit,
/// newest first.
pub trait LogSource {
    /// Reads the whole log.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or the git executable cannot be
    /// reached.
    fn read_log(&self) -> GitResult<String>;

    /// Reads and parses the log.
    ///
    /// Fails on the first malformed line.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read or a line cannot be parsed.
    fn commits(&self) -> GitResult<Vec<Commit>> {
        let log = self.read_log()?;
        Ok(parse_log(&log)?)
    }
}

/// A log held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticLog {
    log: String,
}

impl StaticLog {
    /// Creates a source returning `log` verbatim.
    #[must_use]
    pub fn new(log: impl Into<String>) -> Self {
        Self { log: log.into() }
    }
}

impl LogSource for StaticLog {
    fn read_log(&self) -> GitResult<String> {
        Ok(self.log.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GitError;

    #[test]
    fn test_static_log_read() {
        let source = StaticLog::new("abc123  | fix: a\n");
        assert_eq!(source.read_log().unwrap(), "abc123  | fix: a\n");
    }

    #[test]
    fn test_commits() {
        let source = StaticLog::new("abc123 tag: v1.0.0 | feat: a\ndef456  | fix: b\n");
        let commits = source.commits().unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].tag_name(), Some("v1.0.0"));
        assert_eq!(commits[1].subject, "fix: b");
    }

    #[test]
    fn test_commits_malformed() {
        let source = StaticLog::new("abc123  | fix: a\nbroken\n");
        match source.commits() {
            Err(GitError::Parse(err)) => assert_eq!(err.line, "broken"),
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_is_empty() {
        assert!(StaticLog::default().commits().unwrap().is_empty());
    }
}
