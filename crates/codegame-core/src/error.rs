//! Error kinds surfaced by library version resolution

use thiserror::Error;

/// Failure to turn a requested version into a published library tag.
///
/// None of these are retried: they reflect missing remote data or a typo
/// in the requested version.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no published versions found for '{library}'")]
    NoTagsFound { library: String },

    #[error("invalid library version '{value}', expected <major>.<minor> (e.g. 0.8)")]
    InvalidVersionFormat { value: String },

    #[error("no version of '{library}' matches {requested}; try another --library-version")]
    NoCompatibleVersion { library: String, requested: String },

    #[error("failed to fetch versions of '{library}'")]
    TagFetch {
        library: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
