//! Requested library versions

use crate::error::ResolveError;
use std::fmt;
use std::str::FromStr;

/// Literal accepted for "use the newest published version"
pub const LATEST: &str = "latest";

/// A `major.minor` library version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LibraryVersion {
    pub major: u64,
    pub minor: u64,
}

impl LibraryVersion {
    pub fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    /// Parse `major.minor` (a leading `v` is tolerated)
    pub fn parse(value: &str) -> Result<Self, ResolveError> {
        let invalid = || ResolveError::InvalidVersionFormat {
            value: value.to_string(),
        };

        let trimmed = value.trim();
        let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let (major, minor) = cleaned.split_once('.').ok_or_else(invalid)?;

        Ok(Self {
            major: parse_component(major).ok_or_else(invalid)?,
            minor: parse_component(minor).ok_or_else(invalid)?,
        })
    }

    /// Derive the version from a tag by keeping its first two components
    /// (`v0.8.3` -> `0.8`)
    pub fn from_tag(tag: &str) -> Result<Self, ResolveError> {
        let cleaned = tag.strip_prefix('v').unwrap_or(tag);
        let truncated = cleaned.split('.').take(2).collect::<Vec<_>>().join(".");
        Self::parse(&truncated).map_err(|_| ResolveError::InvalidVersionFormat {
            value: tag.to_string(),
        })
    }

    /// Prefix every tag of this version starts with
    pub fn tag_prefix(&self) -> String {
        format!("v{}.{}", self.major, self.minor)
    }

    /// Whether `tag` starts with this version's prefix.
    ///
    /// This is a plain string prefix test, so `0.1` also claims `v0.10.0`.
    pub fn matches_tag(&self, tag: &str) -> bool {
        tag.starts_with(&self.tag_prefix())
    }

    /// Like [`matches_tag`](Self::matches_tag), but the prefix must end on a
    /// component boundary (`0.1` matches `v0.1.4`, not `v0.10.0`)
    pub fn matches_tag_on_boundary(&self, tag: &str) -> bool {
        match tag.strip_prefix(&self.tag_prefix()) {
            Some(rest) => !rest.starts_with(|c: char| c.is_ascii_digit()),
            None => false,
        }
    }

    /// Whether `tag` belongs to this version under `rule`
    pub fn matches(&self, tag: &str, rule: PrefixMatch) -> bool {
        match rule {
            PrefixMatch::Literal => self.matches_tag(tag),
            PrefixMatch::ComponentBoundary => self.matches_tag_on_boundary(tag),
        }
    }

    /// The version as a semver value with patch 0
    pub fn to_semver(&self) -> semver::Version {
        semver::Version::new(self.major, self.minor, 0)
    }
}

/// Components are canonical decimal numbers: `08` is rejected so that the
/// prefix built from the parsed value is the text the user typed.
fn parse_component(component: &str) -> Option<u64> {
    if component.is_empty() || !component.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if component.len() > 1 && component.starts_with('0') {
        return None;
    }
    component.parse().ok()
}

/// How tags are matched against a `major.minor` prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixMatch {
    /// Any tag starting with `v<major>.<minor>`
    #[default]
    Literal,
    /// The prefix must be followed by a non-digit or the end of the tag
    ComponentBoundary,
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for LibraryVersion {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Version constraint requested by the user or config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionSpecifier {
    /// Newest published version
    #[default]
    Latest,
    /// A specific `major.minor`
    Exact(LibraryVersion),
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSpecifier::Latest => write!(f, "{}", LATEST),
            VersionSpecifier::Exact(version) => write!(f, "{}", version),
        }
    }
}

impl FromStr for VersionSpecifier {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(LATEST) {
            Ok(VersionSpecifier::Latest)
        } else {
            LibraryVersion::parse(s).map(VersionSpecifier::Exact)
        }
    }
}
