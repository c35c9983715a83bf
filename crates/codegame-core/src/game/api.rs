//! HTTP access to a running CodeGame game server

use anyhow::{Context, Result};
use url::Url;

/// Strip whitespace, a trailing `/` and any scheme from a game URL
/// (`https://games.example.com/pong/` -> `games.example.com/pong`)
pub fn trim_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

/// Client for the game server's HTTP API
#[derive(Debug, Clone)]
pub struct GameServer {
    client: reqwest::Client,
    base_url: Url,
}

impl GameServer {
    /// Create a client for a server whose base URL (with scheme) is known
    pub fn new(base_url: Url, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url,
        }
    }

    /// Connect to a game URL as written by the user.
    ///
    /// URLs without a scheme are probed over HTTPS first and fall back to
    /// plain HTTP when the TLS request fails.
    pub async fn connect(url: &str, user_agent: &str) -> Result<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            anyhow::bail!("Game URL must not be empty");
        }

        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            let base =
                Url::parse(trimmed).with_context(|| format!("Invalid game URL: {}", trimmed))?;
            return Ok(Self::new(base, user_agent));
        }

        let https = Url::parse(&format!("https://{}", trimmed))
            .with_context(|| format!("Invalid game URL: {}", trimmed))?;
        let server = Self::new(https, user_agent);
        if server.is_reachable().await {
            return Ok(server);
        }

        let http = Url::parse(&format!("http://{}", trimmed))
            .with_context(|| format!("Invalid game URL: {}", trimmed))?;
        Ok(Self::new(http, user_agent))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", self.base_url))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    async fn is_reachable(&self) -> bool {
        match self.endpoint(&["api", "info"]) {
            Ok(url) => self.client.get(url).send().await.is_ok(),
            Err(_) => false,
        }
    }

    /// Fetch the game's CGE file (`/api/events`)
    pub async fn cge_file(&self) -> Result<String> {
        let url = self.endpoint(&["api", "events"])?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch CGE file from {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch CGE file from {}: HTTP {}",
                url,
                response.status()
            );
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read CGE file from {}", url))
    }
}
