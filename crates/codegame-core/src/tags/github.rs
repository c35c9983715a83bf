//! Tag listing through the GitHub REST API

use super::TagProvider;
use crate::library::Library;
use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

/// Default GitHub API endpoint
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Environment variable overriding the GitHub API endpoint
pub const GITHUB_API_URL_ENV: &str = "CODEGAME_GITHUB_API_URL";

/// Environment variable holding an optional GitHub token
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Tags per page requested from the API (the maximum GitHub allows)
const PER_PAGE: &str = "100";

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

/// Fetches tags of GitHub repositories in the order the API returns them,
/// following `Link: rel="next"` across pages
#[derive(Debug, Clone)]
pub struct GitHubTags {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl GitHubTags {
    /// Create a provider for a custom API base URL
    pub fn new(base_url: Url, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url,
            token: None,
        }
    }

    /// Create a provider honoring `CODEGAME_GITHUB_API_URL` and `GITHUB_TOKEN`
    pub fn from_env(user_agent: &str) -> Result<Self> {
        let url_str =
            std::env::var(GITHUB_API_URL_ENV).unwrap_or_else(|_| GITHUB_API_URL.to_string());
        let base_url =
            Url::parse(&url_str).with_context(|| format!("Invalid GitHub API URL: {}", url_str))?;

        let mut provider = Self::new(base_url, user_agent);
        provider.token = std::env::var(GITHUB_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty());
        Ok(provider)
    }

    /// Authenticate requests with a token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// `{base}/repos/{owner}/{repo}/tags?per_page=100`, preserving the base path
    fn tags_url(&self, library: &Library) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", self.base_url))?
            .pop_if_empty()
            .extend(["repos", library.owner, library.repository, "tags"]);
        url.query_pairs_mut().append_pair("per_page", PER_PAGE);
        Ok(url)
    }

    /// Fetch one page of tags and the URL of the following page, if any
    async fn fetch_page(
        &self,
        library: &Library,
        url: &Url,
    ) -> Result<(Vec<String>, Option<Url>)> {
        let mut request = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to fetch tags from {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch tags from {}: HTTP {}", url, response.status());
        }

        let next = next_page(response.headers());
        let entries: Vec<TagEntry> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse tag list of {}", library.name))?;

        Ok((entries.into_iter().map(|entry| entry.name).collect(), next))
    }
}

/// Target of the `rel="next"` entry of a `Link` header
fn next_page(headers: &reqwest::header::HeaderMap) -> Option<Url> {
    let link = headers.get(reqwest::header::LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        let is_next = params
            .split(';')
            .any(|param| param.trim() == r#"rel="next""#);
        if !is_next {
            return None;
        }
        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        Url::parse(target).ok()
    })
}

impl TagProvider for GitHubTags {
    async fn fetch_tags(&self, library: &Library) -> Result<Vec<String>> {
        let mut tags = Vec::new();
        let mut next = Some(self.tags_url(library)?);

        while let Some(url) = next {
            let (page, following) = self.fetch_page(library, &url).await?;
            tags.extend(page);
            next = following.filter(|following| *following != url);
        }
        Ok(tags)
    }
}
