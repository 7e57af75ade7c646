//! Semantic version parser.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::version::{PreRelease, PreReleaseType, SemanticVersion, VersionError, VersionResult};

static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?xi)
        ^
        (?<major>0|[1-9][0-9]*)
        \.
        (?<minor>0|[1-9][0-9]*)
        \.
        (?<patch>0|[1-9][0-9]*)
        (?:-(?<prerelease>
            (?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)
            (?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*
        ))?
        (?:\+(?<buildmetadata>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?
        $",
    )
    .expect("invalid regex")
});

/// Parses SemVer 2.0.0 strings, with an optional leading `v`.
///
/// Pre-release identifiers are restricted to `alpha`, `beta`, `rc` and
/// unsigned integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticVersionParser;

impl SemanticVersionParser {
    /// Parses a version string such as `v1.2.3-beta.2+20210101`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::MissingVersionComponents`] if the string is not
    /// a SemVer string, or any error from [`Self::parse_pre_release`].
    pub fn parse(version: &str) -> VersionResult<SemanticVersion> {
        let version = version.strip_prefix('v').unwrap_or(version);
        let captures = SEMVER_RE
            .captures(version)
            .ok_or(VersionError::MissingVersionComponents)?;

        let component = |name: &str| -> VersionResult<u64> {
            captures
                .name(name)
                .and_then(|m| m.as_str().parse().ok())
                .ok_or(VersionError::MissingVersionComponents)
        };
        let major = component("major")?;
        let minor = component("minor")?;
        let patch = component("patch")?;

        let pre_release = captures
            .name("prerelease")
            .map(|m| Self::parse_pre_release(m.as_str()))
            .transpose()?;
        let build_metadata = captures.name("buildmetadata").map(|m| m.as_str().to_string());

        SemanticVersion::new(major, minor, patch, pre_release, build_metadata)
    }

    /// Parses the part between `-` and `+`, e.g. `alpha.beta.1`.
    ///
    /// Every identifier must be `alpha`, `beta`, `rc` or an unsigned integer.
    /// When several integers are present the last one wins.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::UnknownPreReleaseType`] for any other
    /// identifier, and [`VersionError::EmptyPreReleaseChain`] if no stage
    /// identifier is present.
    pub fn parse_pre_release(pre_release: &str) -> VersionResult<PreRelease> {
        let mut chain = Vec::new();
        let mut version = None;

        for token in pre_release.split('.').filter(|t| !t.is_empty()) {
            if let Some(stage) = PreReleaseType::from_identifier(token) {
                chain.push(stage);
            } else if let Ok(number) = token.parse::<u64>() {
                version = Some(number);
            } else {
                return Err(VersionError::UnknownPreReleaseType {
                    token: token.to_string(),
                });
            }
        }

        PreRelease::new(chain, version)
    }

    /// Extracts a version from a tag name carrying `prefix` (e.g. `v`,
    /// `release-`).
    ///
    /// Returns `None` if the tag lacks the prefix or is not a version.
    #[must_use]
    pub fn from_tag(tag: &str, prefix: &str) -> Option<SemanticVersion> {
        let rest = tag.strip_prefix(prefix)?;
        match Self::parse(rest) {
            Ok(version) => Some(version),
            Err(error) => {
                debug!(tag, %error, "tag is not a version");
                None
            }
        }
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticVersionParser::parse(s)
    }
}
