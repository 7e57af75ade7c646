//! Semantic version model and precedence.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

/// Errors raised while building or parsing a [`SemanticVersion`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Major, minor or patch is missing or malformed.
    #[error("missing or malformed major.minor.patch components")]
    MissingVersionComponents,

    /// A pre-release identifier is neither a known type nor a number.
    #[error("unknown pre-release type: {token}")]
    UnknownPreReleaseType {
        /// The offending identifier.
        token: String,
    },

    /// A pre-release without any `alpha`/`beta`/`rc` identifier.
    #[error("pre-release has no alpha, beta or rc identifier")]
    EmptyPreReleaseChain,

    /// Build metadata was given but is empty.
    #[error("build metadata must not be empty")]
    EmptyBuildMetadata,
}

/// Result type for version operations.
pub type VersionResult<T> = Result<T, VersionError>;

/// A pre-release stage, ordered `Alpha < Beta < Rc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreReleaseType {
    /// `alpha`
    Alpha,
    /// `beta`
    Beta,
    /// `rc`
    Rc,
}

impl PreReleaseType {
    /// Matches an identifier exactly (case-sensitive).
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "alpha" => Some(Self::Alpha),
            "beta" => Some(Self::Beta),
            "rc" => Some(Self::Rc),
            _ => None,
        }
    }

    /// Returns the identifier as written in a version string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Rc => "rc",
        }
    }
}

impl fmt::Display for PreReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pre-release: a non-empty chain of stages and an optional trailing number.
///
/// Ordering:
/// 1. a shorter chain sorts first, whatever its content;
/// 2. equal-length chains compare stage by stage;
/// 3. identical chains compare by number, where a missing number ranks
///    *above* any number (`alpha.1 < alpha`).
///
/// Rule 3 inverts the usual SemVer reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreRelease {
    chain: Vec<PreReleaseType>,
    version: Option<u64>,
}

impl PreRelease {
    /// Creates a pre-release.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::EmptyPreReleaseChain`] if `chain` is empty.
    pub fn new(chain: Vec<PreReleaseType>, version: Option<u64>) -> VersionResult<Self> {
        if chain.is_empty() {
            return Err(VersionError::EmptyPreReleaseChain);
        }
        Ok(Self { chain, version })
    }

    /// Returns the stage chain (never empty).
    #[must_use]
    pub fn chain(&self) -> &[PreReleaseType] {
        &self.chain
    }

    /// Returns the trailing number.
    #[must_use]
    pub fn version(&self) -> Option<u64> {
        self.version
    }
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chain
            .len()
            .cmp(&other.chain.len())
            .then_with(|| self.chain.cmp(&other.chain))
            .then_with(|| match (self.version, other.version) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.chain.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{stage}")?;
        }
        if let Some(version) = self.version {
            write!(f, ".{version}")?;
        }
        Ok(())
    }
}

/// A semantic version.
///
/// Equality is structural, build metadata included. Ordering is precedence
/// ([`SemanticVersion::cmp_precedence`]) and never looks at build metadata,
/// so there is no [`Ord`]: two versions that differ only in build metadata
/// are unequal yet unordered (`partial_cmp` returns `None`).
///
/// Every field without an invariant of its own is public. Build metadata is
/// private because it must not be empty; read it with
/// [`SemanticVersion::build_metadata`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    /// Major version.
    pub major: u64,
    /// Minor version.
    pub minor: u64,
    /// Patch version.
    pub patch: u64,
    /// Pre-release, already validated by [`PreRelease::new`].
    pub pre_release: Option<PreRelease>,
    build_metadata: Option<String>,
}

impl SemanticVersion {
    /// Creates a version with a pre-release and build metadata.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::EmptyBuildMetadata`] if `build_metadata` is
    /// `Some("")`.
    pub fn new(
        major: u64,
        minor: u64,
        patch: u64,
        pre_release: Option<PreRelease>,
        build_metadata: Option<String>,
    ) -> VersionResult<Self> {
        if build_metadata.as_deref().is_some_and(str::is_empty) {
            return Err(VersionError::EmptyBuildMetadata);
        }
        Ok(Self {
            major,
            minor,
            patch,
            pre_release,
            build_metadata,
        })
    }

    /// Creates a plain `major.minor.patch` version.
    #[must_use]
    pub fn release(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
            build_metadata: None,
        }
    }

    /// Returns the build metadata, if any.
    #[must_use]
    pub fn build_metadata(&self) -> Option<&str> {
        self.build_metadata.as_deref()
    }

    /// Returns true if this is a pre-release.
    #[must_use]
    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// Compares by release precedence, ignoring build metadata.
    ///
    /// A version without pre-release ranks above the same version with one.
    #[must_use]
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.cmp_precedence(other) {
            Ordering::Equal if self != other => None,
            ordering => Some(ordering),
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre_release) = &self.pre_release {
            write!(f, "-{pre_release}")?;
        }
        if let Some(build) = &self.build_metadata {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}
