//! Release grouping and Markdown rendering.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use chronicle_commit::{Commit, CommitType, ConventionalCommit, Tag};
use chronicle_conventional::ConventionalCommitParser;
use tracing::{debug, warn};

use crate::{SemanticVersion, SemanticVersionParser};

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangelogOptions {
    /// Render commits whose type is neither `feat` nor `fix`.
    pub include_unknown: bool,

    /// Append the abbreviated hash to each entry.
    pub include_hashes: bool,
}

impl Default for ChangelogOptions {
    fn default() -> Self {
        Self {
            include_unknown: false,
            include_hashes: true,
        }
    }
}

/// A tagged release and the commits it introduced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// The version parsed from the tag.
    pub version: SemanticVersion,

    /// The tag the version was read from.
    pub tag: Tag,

    /// The date of the tagged commit.
    pub date: Option<DateTime<Utc>>,

    /// Classified commits, newest first. Includes the tagged commit itself.
    pub commits: Vec<ConventionalCommit>,
}

/// Commits grouped into releases, newest release first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    unreleased: Vec<ConventionalCommit>,
    releases: Vec<Release>,
    skipped: Vec<Commit>,
}

impl Changelog {
    /// Groups a newest-first commit list into releases.
    ///
    /// Every commit whose tag (minus `tag_prefix`) is a semantic version opens
    /// a release; the commits above the newest such tag are unreleased. Tags
    /// that are not versions are ignored. Releases are sorted by descending
    /// precedence, newest first among equals.
    pub fn build(commits: &[Commit], tag_prefix: &str, parser: &ConventionalCommitParser) -> Self {
        let mut changelog = Self::default();

        for commit in commits {
            if let Some(tag) = &commit.tag {
                match SemanticVersionParser::from_tag(&tag.name, tag_prefix) {
                    Some(version) => {
                        debug!(%version, tag = %tag, "opening release");
                        changelog.releases.push(Release {
                            version,
                            tag: tag.clone(),
                            date: commit.commit_date,
                            commits: Vec::new(),
                        });
                    }
                    None => warn!(tag = %tag, "ignoring tag that is not a version"),
                }
            }

            match parser.parse(commit) {
                Ok(parsed) => match changelog.releases.last_mut() {
                    Some(release) => release.commits.push(parsed),
                    None => changelog.unreleased.push(parsed),
                },
                Err(_) => changelog.skipped.push(commit.clone()),
            }
        }

        // Stable: releases of equal precedence keep their history order.
        changelog
            .releases
            .sort_by(|a, b| b.version.cmp_precedence(&a.version));
        changelog
    }

    /// Returns the commits newer than the latest release.
    #[must_use]
    pub fn unreleased(&self) -> &[ConventionalCommit] {
        &self.unreleased
    }

    /// Returns the releases, highest precedence first.
    #[must_use]
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// Returns the commits that did not follow the conventional grammar.
    #[must_use]
    pub fn skipped(&self) -> &[Commit] {
        &self.skipped
    }

    /// Renders the changelog as Markdown.
    #[must_use]
    pub fn render_markdown(&self, options: &ChangelogOptions) -> String {
        let mut output = String::from("# Changelog\n\n");

        if !self.unreleased.is_empty() {
            output.push_str("## Unreleased\n\n");
            render_sections(&mut output, &self.unreleased, options);
        }

        for release in &self.releases {
            match release.date {
                Some(date) => {
                    _ = writeln!(output, "## {} ({})\n", release.version, date.format("%Y-%m-%d"));
                }
                None => {
                    _ = writeln!(output, "## {}\n", release.version);
                }
            }
            render_sections(&mut output, &release.commits, options);
        }

        let mut output = output.trim_end().to_string();
        output.push('\n');
        output
    }
}

fn section_label(commit_type: CommitType) -> &'static str {
    match commit_type {
        CommitType::Feat => "Features",
        CommitType::Fix => "Bug Fixes",
        CommitType::Unknown => "Other Changes",
    }
}

fn render_sections(output: &mut String, commits: &[ConventionalCommit], options: &ChangelogOptions) {
    let mut sections = vec![CommitType::Feat, CommitType::Fix];
    if options.include_unknown {
        sections.push(CommitType::Unknown);
    }

    for commit_type in sections {
        let entries: Vec<_> = commits
            .iter()
            .filter(|c| c.commit_type == commit_type)
            .collect();
        if entries.is_empty() {
            continue;
        }

        _ = writeln!(output, "### {}\n", section_label(commit_type));
        for commit in entries {
            let scope = if commit.scope.is_empty() {
                String::new()
            } else {
                format!("**{}:** ", commit.scope.join(", "))
            };
            let hash = if options.include_hashes {
                format!(" ({})", commit.hash())
            } else {
                String::new()
            };
            _ = writeln!(output, "- {scope}{}{hash}", commit.subject);
        }
        output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chronicle_commit::Author;

    fn commit(hash: &str, seconds: i64, subject: &str, tag: Option<&str>) -> Commit {
        Commit::new(
            hash,
            Utc.timestamp_opt(seconds, 0).single(),
            Author::placeholder(),
            subject,
            tag.map(Tag::new),
        )
    }

    fn build(commits: &[Commit]) -> Changelog {
        Changelog::build(commits, "v", &ConventionalCommitParser::new())
    }

    fn history() -> Vec<Commit> {
        vec![
            commit("a000001", 1_623_009_900, "feat(cli): add flag", None),
            commit("a000002", 1_623_009_800, "chore(release): 2.0.0", Some("v2.0.0")),
            commit("a000003", 1_623_009_700, "fix(foo, bar): handle empty input", None),
            commit("a000004", 1_623_009_600, "Merge pull request #1", None),
            commit("a000005", 1_623_009_500, "chore(release): 2.0.0-rc.1", Some("v2.0.0-rc.1")),
            commit("a000006", 1_623_009_400, "feat: initial commit", Some("v1.0.0")),
        ]
    }

    #[test]
    fn test_build_groups_by_tag() {
        let changelog = build(&history());

        assert_eq!(changelog.unreleased().len(), 1);
        assert_eq!(changelog.unreleased()[0].hash(), "a000001");

        let versions: Vec<String> = changelog
            .releases()
            .iter()
            .map(|r| r.version.to_string())
            .collect();
        assert_eq!(versions, ["2.0.0", "2.0.0-rc.1", "1.0.0"]);

        let hashes: Vec<&str> = changelog.releases()[0]
            .commits
            .iter()
            .map(ConventionalCommit::hash)
            .collect();
        assert_eq!(hashes, ["a000002", "a000003"]);

        assert_eq!(changelog.skipped().len(), 1);
        assert_eq!(changelog.skipped()[0].abbreviated_hash, "a000004");
    }

    #[test]
    fn test_build_sorts_by_precedence_not_history() {
        // A release-candidate tag that lands after the final release in history.
        let commits = vec![
            commit("b000001", 300, "fix: late rc fix", Some("v1.1.0-rc.1")),
            commit("b000002", 200, "feat: something", Some("v1.1.0")),
            commit("b000003", 100, "feat: first", Some("v1.0.0")),
        ];
        let changelog = build(&commits);

        let versions: Vec<String> = changelog
            .releases()
            .iter()
            .map(|r| r.version.to_string())
            .collect();
        assert_eq!(versions, ["1.1.0", "1.1.0-rc.1", "1.0.0"]);
    }

    #[test]
    fn test_build_metadata_keeps_history_order() {
        let commits = vec![
            commit("e000001", 300, "fix: rebuilt", Some("v1.0.0+a")),
            commit("e000002", 200, "feat: first build", Some("v1.0.0+b")),
            commit("e000003", 100, "feat: older", Some("v0.9.0+z")),
        ];
        let changelog = build(&commits);

        let tags: Vec<&str> = changelog
            .releases()
            .iter()
            .map(|r| r.tag.name.as_str())
            .collect();
        assert_eq!(tags, ["v1.0.0+a", "v1.0.0+b", "v0.9.0+z"]);
    }

    #[test]
    fn test_build_ignores_non_version_tags() {
        let commits = vec![
            commit("c000001", 300, "fix: b", Some("nightly")),
            commit("c000002", 200, "feat: a", Some("v1.0.0")),
        ];
        let changelog = build(&commits);

        assert_eq!(changelog.unreleased().len(), 1);
        assert_eq!(changelog.releases().len(), 1);
    }

    #[test]
    fn test_build_honors_tag_prefix() {
        let commits = vec![
            commit("d000001", 300, "fix: b", Some("release-1.1.0")),
            commit("d000002", 200, "feat: a", Some("v1.0.0")),
        ];
        let changelog = Changelog::build(&commits, "release-", &ConventionalCommitParser::new());

        assert_eq!(changelog.releases().len(), 1);
        assert_eq!(changelog.releases()[0].version.to_string(), "1.1.0");
        assert_eq!(changelog.releases()[0].commits.len(), 2);
    }

    #[test]
    fn test_build_empty() {
        let changelog = build(&[]);
        assert_eq!(changelog, Changelog::default());
        assert_eq!(changelog.render_markdown(&ChangelogOptions::default()), "# Changelog\n");
    }

    #[test]
    fn test_render_markdown() {
        let output = build(&history()).render_markdown(&ChangelogOptions::default());

        let expected = "\
# Changelog

## Unreleased

### Features

- **cli:** add flag (a000001)

## 2.0.0 (2021-06-06)

### Bug Fixes

- **foo, bar:** handle empty input (a000003)

## 2.0.0-rc.1 (2021-06-06)

## 1.0.0 (2021-06-06)

### Features

- initial commit (a000006)
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_render_markdown_with_unknown_without_hashes() {
        let options = ChangelogOptions {
            include_unknown: true,
            include_hashes: false,
        };
        let output = build(&history()).render_markdown(&options);

        assert!(output.contains("### Other Changes\n\n- **release:** 2.0.0\n"));
        assert!(output.contains("- **foo, bar:** handle empty input\n"));
        assert!(!output.contains("(a000003)"));
    }

    #[test]
    fn test_render_markdown_without_date() {
        let commits = vec![Commit::new(
            "e000001",
            None,
            Author::placeholder(),
            "feat: undated",
            Some(Tag::new("v0.1.0")),
        )];
        let output = build(&commits).render_markdown(&ChangelogOptions::default());
        assert!(output.contains("## 0.1.0\n\n### Features\n\n- undated (e000001)\n"));
    }
}
