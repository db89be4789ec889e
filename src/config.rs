use std::fmt;

use thiserror::Error;
use url::Url;

use portfolio_repos::{FetchError, GithubClient};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GITHUB_GRAPHQL_URL is not a valid URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("GITHUB_MAX_PAGES must be a positive integer, got {0:?}")]
    InvalidMaxPages(String),
}

/// Values read from the environment (and `.env`).
///
/// Username and token are passed through as-is, even when empty, so the
/// fetcher reports them as missing credentials.
#[derive(Clone)]
pub struct Settings {
    pub username: String,
    pub token: String,
    pub endpoint: Option<Url>,
    pub max_pages: Option<usize>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

impl Settings {
    /// Variables:
    /// - `GITHUB_USERNAME`
    /// - `GITHUB_PAT`
    /// - `GITHUB_GRAPHQL_URL` (default: `https://api.github.com/graphql`)
    /// - `GITHUB_MAX_PAGES` (default: no cap)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = match lookup("GITHUB_GRAPHQL_URL").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(Url::parse(raw.trim())?),
            None => None,
        };

        let max_pages = match lookup("GITHUB_MAX_PAGES").filter(|v| !v.trim().is_empty()) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => return Err(ConfigError::InvalidMaxPages(raw)),
            },
            None => None,
        };

        Ok(Self {
            username: lookup("GITHUB_USERNAME").unwrap_or_default(),
            token: lookup("GITHUB_PAT").unwrap_or_default(),
            endpoint,
            max_pages,
        })
    }

    pub fn client(&self) -> Result<GithubClient, FetchError> {
        let client = match &self.endpoint {
            Some(endpoint) => GithubClient::with_endpoint(endpoint.clone())?,
            None => GithubClient::new()?,
        };
        Ok(match self.max_pages {
            Some(limit) => client.with_max_pages(limit),
            None => client,
        })
    }
}
