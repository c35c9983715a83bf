//! Sources of published library tags
//!
//! This module provides:
//! - The `TagProvider` trait used by the version resolver
//! - `GitHubTags`, which lists tags through the GitHub REST API
//! - `StaticTags`, a fixed in-memory list

pub mod github;

use crate::library::Library;
use anyhow::Result;
use std::future::Future;

pub use github::GitHubTags;

/// Lists the published version tags of a library, newest first
pub trait TagProvider {
    fn fetch_tags(&self, library: &Library) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Tag provider backed by a fixed list, returned for every library
#[derive(Debug, Clone, Default)]
pub struct StaticTags {
    tags: Vec<String>,
}

impl StaticTags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl TagProvider for StaticTags {
    async fn fetch_tags(&self, _library: &Library) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }
}
