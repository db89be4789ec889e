use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::errors::FetchError;
use crate::graphql::{GraphQlRequest, GraphQlResponse};
use crate::models::{
    PinnedData, PinnedRepositories, PublicRepositories, PublicUser, RepositoryRecord,
    primary_languages,
};

pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// GitHub rejects requests without a User-Agent.
const CLIENT_USER_AGENT: &str = "portfolio-repos/0.1";

/// Client for the GitHub GraphQL endpoint.
///
/// Holds no credentials: username and token are passed to every call.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    endpoint: Url,
    max_pages: Option<usize>,
}

impl GithubClient {
    /// Client for `https://api.github.com/graphql`.
    pub fn new() -> Result<Self, FetchError> {
        let endpoint = Url::parse(GITHUB_GRAPHQL_URL).expect("GITHUB_GRAPHQL_URL is a valid URL");
        Self::with_endpoint(endpoint)
    }

    /// Client for another GraphQL endpoint (GitHub Enterprise, a local mock).
    pub fn with_endpoint(endpoint: Url) -> Result<Self, FetchError> {
        let http = Client::builder()
            .default_headers({
                let mut headers = HeaderMap::new();
                headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
                headers
            })
            .build()?;

        Ok(Self {
            http,
            endpoint,
            max_pages: None,
        })
    }

    /// Caps how many pages the public-repository listing may request.
    /// Without a cap, pagination runs until GitHub reports the last page.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches up to 6 pinned repositories and every language they use.
    ///
    /// A user that does not exist surfaces as [`FetchError::Schema`].
    #[instrument(skip(self, token))]
    pub async fn fetch_pinned_repositories(
        &self,
        username: &str,
        token: &str,
    ) -> Result<PinnedRepositories, FetchError> {
        require_credentials(username, token)?;

        let data = self.post_query(token, &GraphQlRequest::pinned(username)).await?;

        let parsed = PinnedData::deserialize(&data)
            .map_err(|e| schema_error(format!("pinned repositories: {e}"), &data))?;
        let items = parsed
            .user
            .and_then(|user| user.pinned_items)
            .ok_or_else(|| schema_error("`data.user.pinnedItems` is missing", &data))?;

        let result = PinnedRepositories::from(items);
        info!(
            repositories = result.pinned_repos.len(),
            languages = result.all_unique_languages.len(),
            "Fetched pinned repositories"
        );
        Ok(result)
    }

    /// Walks every page of the user's public repositories and collects their
    /// primary languages.
    ///
    /// A `null` user yields an empty result instead of an error. Any failure
    /// on any page discards the pages already fetched.
    #[instrument(skip(self, token))]
    pub async fn fetch_all_public_repositories_and_languages(
        &self,
        username: &str,
        token: &str,
    ) -> Result<PublicRepositories, FetchError> {
        require_credentials(username, token)?;

        let mut repositories: Vec<RepositoryRecord> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0;

        loop {
            if let Some(limit) = self.max_pages {
                if pages >= limit {
                    error!(limit, "Page limit reached before the last page");
                    return Err(FetchError::PageLimitExceeded { limit });
                }
            }

            let request = GraphQlRequest::public_page(username, cursor.as_deref());
            let data = self.post_query(token, &request).await?;
            pages += 1;

            let user = match data.get("user") {
                None => return Err(schema_error("`data.user` is missing", &data)),
                Some(Value::Null) => {
                    warn!(
                        username,
                        "GitHub user not found or has no accessible public repositories"
                    );
                    return Ok(PublicRepositories::default());
                }
                Some(user) => PublicUser::deserialize(user)
                    .map_err(|e| schema_error(format!("public repositories: {e}"), &data))?,
            };
            let connection = user
                .repositories
                .ok_or_else(|| schema_error("`data.user.repositories` is missing", &data))?;

            let (records, page_info) = connection.into_page();
            debug!(
                page = pages,
                repositories = records.len(),
                has_next_page = page_info.has_next_page,
                "Fetched page of public repositories"
            );
            repositories.extend(records);

            match page_info.next_cursor() {
                Some(next) => cursor = Some(next.to_owned()),
                None => break,
            }
        }

        let unique_languages = primary_languages(&repositories);
        info!(
            pages,
            repositories = repositories.len(),
            languages = unique_languages.len(),
            "Fetched public repositories"
        );
        Ok(PublicRepositories {
            repositories,
            unique_languages,
        })
    }

    /// Sends one query and returns its `data`, after the status and `errors`
    /// checks have passed.
    async fn post_query<V: Serialize>(
        &self,
        token: &str,
        request: &GraphQlRequest<'_, V>,
    ) -> Result<Value, FetchError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("bearer {token}"))
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(%status, error = %e, "Could not read error response body");
                    String::new()
                }
            };
            error!(%status, %body, "GitHub API responded with an error status");
            return Err(FetchError::Transport { status, body });
        }

        let raw_body = response.text().await?;

        let parsed: Value = match serde_json::from_str(&raw_body) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(error = %e, body = %raw_body, "GitHub API response is not JSON");
                return Err(FetchError::schema(format!("body is not JSON: {e}"), raw_body));
            }
        };
        let mut envelope = match GraphQlResponse::deserialize(&parsed) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!(error = %e, body = %raw_body, "GitHub API response is not a JSON object");
                return Err(FetchError::schema(
                    format!("body is not a GraphQL response: {e}"),
                    raw_body,
                ));
            }
        };

        if let Some(errors) = envelope.take_errors() {
            error!(?errors, "GitHub API errors");
            return Err(FetchError::Api { errors });
        }

        match envelope.data {
            Some(data) => Ok(data),
            None => {
                error!(body = %raw_body, "GitHub API response has no `data`");
                Err(FetchError::schema("`data` is missing", raw_body))
            }
        }
    }
}

fn require_credentials(username: &str, token: &str) -> Result<(), FetchError> {
    if username.trim().is_empty() || token.trim().is_empty() {
        return Err(FetchError::MissingCredentials);
    }
    Ok(())
}

fn schema_error(reason: impl Into<String>, data: &Value) -> FetchError {
    let reason = reason.into();
    error!(%reason, payload = %data, "GitHub API response does not match expected structure");
    FetchError::schema(reason, data.to_string())
}

/// [`GithubClient::fetch_pinned_repositories`] against api.github.com.
pub async fn fetch_pinned_repositories(
    username: &str,
    token: &str,
) -> Result<PinnedRepositories, FetchError> {
    require_credentials(username, token)?;
    GithubClient::new()?
        .fetch_pinned_repositories(username, token)
        .await
}

/// [`GithubClient::fetch_all_public_repositories_and_languages`] against api.github.com.
pub async fn fetch_all_public_repositories_and_languages(
    username: &str,
    token: &str,
) -> Result<PublicRepositories, FetchError> {
    require_credentials(username, token)?;
    GithubClient::new()?
        .fetch_all_public_repositories_and_languages(username, token)
        .await
}
