//! Log line parser.
//!
//! Lines are produced by `git log "--pretty=%at %h %D | %s"`, e.g.
//!
//! ```text
//! 1623009728 ec3a4b6 HEAD -> main, tag: v1.10.7, origin/main | chore(release): 1.10.7
//! 1623009001 9bb1e99  | chore(deps): update dependencies
//! ```

use std::sync::LazyLock;

use chrono::{TimeZone, Utc};
use chronicle_commit::{Author, Commit, Tag};
use regex::Regex;
use tracing::debug;

use crate::LineParseError;

// The timestamp is optional so that `%h %D | %s` logs still parse.
static LOG_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?<timestamp>\d+)\s)?(?<sha>[a-f0-9]+)\s+(?<refs>.*?)\s*\|\s(?<subject>.*)$",
    )
    .expect("invalid regex")
});

const TAG_PREFIX: &str = "tag: ";

/// Parses one log line into a [`Commit`].
///
/// The subject is everything after the first ` | ` delimiter. The author is
/// always [`Author::placeholder`].
///
/// # Errors
///
/// Returns [`LineParseError`] if the line does not match the log format or
/// carries a timestamp outside the representable range.
pub fn parse_log_line(line: &str) -> Result<Commit, LineParseError> {
    let error = || LineParseError {
        line: line.to_string(),
    };

    let captures = LOG_LINE_RE.captures(line).ok_or_else(error)?;
    let sha = captures.name("sha").ok_or_else(error)?.as_str();
    let subject = captures.name("subject").ok_or_else(error)?.as_str();
    let refs = captures.name("refs").map_or("", |m| m.as_str());

    let commit_date = match captures.name("timestamp") {
        Some(m) => {
            let seconds: i64 = m.as_str().parse().map_err(|_| error())?;
            Some(Utc.timestamp_opt(seconds, 0).single().ok_or_else(error)?)
        }
        None => None,
    };

    Ok(Commit::new(
        sha,
        commit_date,
        Author::placeholder(),
        subject,
        extract_tag(refs).map(Tag::new),
    ))
}

/// Parses a full log, one commit per line, preserving order.
///
/// Empty lines are skipped. Parsing stops at the first malformed line.
///
/// # Errors
///
/// Returns the [`LineParseError`] of the first malformed line.
pub fn parse_log(log: &str) -> Result<Vec<Commit>, LineParseError> {
    let commits = log
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(parse_log_line)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = commits.len(), "parsed log");
    Ok(commits)
}

/// Returns the first `tag: <name>` entry of a comma separated ref list.
fn extract_tag(refs: &str) -> Option<&str> {
    refs.split(',')
        .map(str::trim)
        .find_map(|r| r.strip_prefix(TAG_PREFIX))
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha_and_subject_only() {
        let commit = parse_log_line("7bc76cd  | fix: check if valid remote url").unwrap();

        let expected = Commit::new(
            "7bc76cd",
            None,
            Author::placeholder(),
            "fix: check if valid remote url",
            None,
        );
        assert_eq!(commit, expected);
    }

    #[test]
    fn test_tag_with_other_refs() {
        let commit = parse_log_line(
            "ec3a4b6 HEAD -> main, tag: v1.10.7, origin/main, origin/HEAD | chore(release): 1.10.7",
        )
        .unwrap();

        assert_eq!(commit.abbreviated_hash, "ec3a4b6");
        assert_eq!(commit.tag, Some(Tag::new("v1.10.7")));
        assert_eq!(commit.subject, "chore(release): 1.10.7");
    }

    #[test]
    fn test_tag_without_other_refs() {
        let commit = parse_log_line("54d6657 tag: v1.10.5 | chore(release): 1.10.5").unwrap();

        assert_eq!(commit.abbreviated_hash, "54d6657");
        assert_eq!(commit.tag_name(), Some("v1.10.5"));
        assert_eq!(commit.subject, "chore(release): 1.10.5");
    }

    #[test]
    fn test_with_timestamp() {
        let commit =
            parse_log_line("1623009728 9b32244 tag: v1.10.6 | chore(release): 1.10.6").unwrap();

        assert_eq!(commit.abbreviated_hash, "9b32244");
        assert_eq!(
            commit.commit_date.map(|d| d.timestamp()),
            Some(1_623_009_728)
        );
        assert_eq!(commit.tag_name(), Some("v1.10.6"));
        assert_eq!(commit.subject, "chore(release): 1.10.6");
    }

    #[test]
    fn test_with_timestamp_and_no_refs() {
        let commit = parse_log_line("1623009001 9bb1e99  | chore(deps): update").unwrap();

        assert_eq!(commit.abbreviated_hash, "9bb1e99");
        assert!(commit.commit_date.is_some());
        assert!(commit.tag.is_none());
        assert_eq!(commit.subject, "chore(deps): update");
    }

    #[test]
    fn test_numeric_hash_without_timestamp() {
        let commit = parse_log_line("1234567 tag: v1.0.0 | feat: digits only").unwrap();

        assert_eq!(commit.abbreviated_hash, "1234567");
        assert!(commit.commit_date.is_none());
        assert_eq!(commit.tag_name(), Some("v1.0.0"));
    }

    #[test]
    fn test_subject_keeps_later_delimiters() {
        let commit = parse_log_line("1 abc123 tag: v2.0.0 | feat: a | b: c").unwrap();

        assert_eq!(commit.tag_name(), Some("v2.0.0"));
        assert_eq!(commit.subject, "feat: a | b: c");
    }

    #[test]
    fn test_first_tag_wins() {
        let commit = parse_log_line("abc123 tag: v1.0.0, tag: v1.0.0-rc.1 | chore: release")
            .unwrap();
        assert_eq!(commit.tag_name(), Some("v1.0.0"));
    }

    #[test]
    fn test_tag_prefix_is_case_sensitive() {
        let commit = parse_log_line("abc123 TAG: v1.0.0, main | chore: release").unwrap();
        assert!(commit.tag.is_none());
    }

    #[test]
    fn test_uppercase_hash() {
        let commit = parse_log_line("ABC123F  | fix: shout").unwrap();
        assert_eq!(commit.abbreviated_hash, "ABC123F");
    }

    #[test]
    fn test_empty_subject() {
        let commit = parse_log_line("abc123  | ").unwrap();
        assert_eq!(commit.subject, "");
    }

    #[test]
    fn test_author_is_placeholder() {
        let commit = parse_log_line("abc123  | fix: x").unwrap();
        assert_eq!(commit.author, Author::placeholder());
    }

    #[test]
    fn test_malformed_line() {
        let err = parse_log_line("not a log line").unwrap_err();
        assert_eq!(err.line, "not a log line");
    }

    #[test]
    fn test_missing_delimiter() {
        assert!(parse_log_line("1623009728 abc123 fix: no delimiter").is_err());
    }

    #[test]
    fn test_timestamp_overflow() {
        let line = "99999999999999999999999 abc123  | fix: x";
        let err = parse_log_line(line).unwrap_err();
        assert_eq!(err.line, line);
    }

    #[test]
    fn test_extract_tag() {
        assert_eq!(extract_tag(""), None);
        assert_eq!(extract_tag("HEAD -> main"), None);
        assert_eq!(extract_tag(" tag: v1.0.0 "), Some("v1.0.0"));
        assert_eq!(extract_tag("origin/main, tag: release-2"), Some("release-2"));
    }

    #[test]
    fn test_parse_log_preserves_order() {
        let log = "\
1623009728 ec3a4b6 HEAD -> main, tag: v1.10.7 | chore(release): 1.10.7
1623009600 7bc76cd  | fix: check if valid remote url
1623009500 54d6657 tag: v1.10.6 | chore(release): 1.10.6
";
        let commits = parse_log(log).unwrap();

        let hashes: Vec<_> = commits.iter().map(|c| c.abbreviated_hash.as_str()).collect();
        assert_eq!(hashes, ["ec3a4b6", "7bc76cd", "54d6657"]);
    }

    #[test]
    fn test_parse_log_skips_empty_lines() {
        let commits = parse_log("\nabc123  | fix: a\n\n\ndef456  | feat: b\n").unwrap();
        assert_eq!(commits.len(), 2);
    }

    #[test]
    fn test_parse_log_strips_carriage_returns() {
        let commits = parse_log("abc123  | fix: a\r\ndef456  | feat: b\r\n").unwrap();
        assert_eq!(commits[0].subject, "fix: a");
        assert_eq!(commits[1].subject, "feat: b");
    }

    #[test]
    fn test_parse_log_empty() {
        assert!(parse_log("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_log_first_error_wins() {
        let log = "abc123  | fix: a\nfirst bad line\nsecond bad line\ndef456  | feat: b";
        let err = parse_log(log).unwrap_err();
        assert_eq!(err.line, "first bad line");
    }
}
