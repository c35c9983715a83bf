//! Resolution of a requested version against a library's published tags

use super::specifier::{LibraryVersion, PrefixMatch, VersionSpecifier};
use crate::error::ResolveError;
use crate::library::Library;
use crate::tags::TagProvider;

/// Result of resolving a library version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLibrary {
    /// Import path for the resolved major version
    pub import_path: String,
    /// Exact published tag that was selected
    pub tag: String,
    /// Effective `major.minor`
    pub version: LibraryVersion,
}

impl ResolvedLibrary {
    /// Module query understood by `go get` (`<import_path>@<tag>`)
    pub fn go_get_target(&self) -> String {
        format!("{}@{}", self.import_path, self.tag)
    }
}

/// How a tag is picked among those matching the requested version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// First matching tag in the order the provider returned them
    #[default]
    ProviderOrder,
    /// Matching tag with the highest semver; falls back to provider order
    /// when no matching tag parses as semver
    HighestPatch,
}

/// Pick the tag and import path for `specifier` out of `tags` (newest first).
///
/// Tags are matched against the `v<major>.<minor>` prefix according to `rule`.
pub fn select(
    library: &Library,
    tags: &[String],
    specifier: &VersionSpecifier,
    policy: SelectionPolicy,
    rule: PrefixMatch,
) -> Result<ResolvedLibrary, ResolveError> {
    let newest = tags.first().ok_or_else(|| ResolveError::NoTagsFound {
        library: library.name.to_string(),
    })?;

    let version = match specifier {
        VersionSpecifier::Latest => LibraryVersion::from_tag(newest)?,
        VersionSpecifier::Exact(version) => *version,
    };

    let mut candidates = tags.iter().filter(|tag| version.matches(tag, rule));
    let tag = match policy {
        SelectionPolicy::ProviderOrder => candidates.next(),
        SelectionPolicy::HighestPatch => {
            let candidates: Vec<&String> = candidates.collect();
            candidates
                .iter()
                .filter_map(|tag| parse_tag(tag).map(|parsed| (parsed, *tag)))
                .max_by(|a, b| a.0.cmp(&b.0))
                .map(|(_, tag)| tag)
                .or_else(|| candidates.first().copied())
        }
    };

    let tag = tag.ok_or_else(|| ResolveError::NoCompatibleVersion {
        library: library.name.to_string(),
        requested: version.to_string(),
    })?;

    Ok(ResolvedLibrary {
        import_path: library.import_path(version.major),
        tag: tag.clone(),
        version,
    })
}

fn parse_tag(tag: &str) -> Option<semver::Version> {
    semver::Version::parse(tag.strip_prefix('v').unwrap_or(tag)).ok()
}

/// Resolves library versions through a tag provider
#[derive(Debug, Clone)]
pub struct VersionResolver<P> {
    provider: P,
    policy: SelectionPolicy,
    prefix_match: PrefixMatch,
}

impl<P: TagProvider> VersionResolver<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            policy: SelectionPolicy::default(),
            prefix_match: PrefixMatch::default(),
        }
    }

    /// Use a different selection policy
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use a different prefix matching rule
    pub fn with_prefix_match(mut self, prefix_match: PrefixMatch) -> Self {
        self.prefix_match = prefix_match;
        self
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn prefix_match(&self) -> PrefixMatch {
        self.prefix_match
    }

    /// Fetch the library's tags and select the one matching `specifier`
    pub async fn resolve(
        &self,
        library: &Library,
        specifier: &VersionSpecifier,
    ) -> Result<ResolvedLibrary, ResolveError> {
        let tags = self
            .provider
            .fetch_tags(library)
            .await
            .map_err(|source| ResolveError::TagFetch {
                library: library.name.to_string(),
                source: source.into(),
            })?;

        select(library, &tags, specifier, self.policy, self.prefix_match)
    }
}
