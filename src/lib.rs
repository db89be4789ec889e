//! Fetches a GitHub user's showcase repositories over the GraphQL API.
//!
//! Two queries are supported:
//! - the user's pinned repositories (at most 6) with their language breakdown
//! - every public repository, paginated 100 at a time, with primary languages
//!
//! Credentials are never read from the environment here; callers pass the
//! username and access token to each fetch.

pub mod api_client;
pub mod errors;
pub mod graphql;
pub mod models;

pub use api_client::{
    GITHUB_GRAPHQL_URL, GithubClient, fetch_all_public_repositories_and_languages,
    fetch_pinned_repositories,
};
pub use errors::FetchError;
pub use graphql::GraphQlError;
pub use models::{
    Language, LanguageSet, LanguageUsage, PinnedRepositories, PublicRepositories,
    RepositoryRecord,
};
