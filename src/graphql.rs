use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Up to 6 pinned repositories, each with its 10 largest languages.
pub const PINNED_REPOSITORIES_QUERY: &str = r#"
query GetPinnedRepositoriesWithLanguages($username: String!) {
  user(login: $username) {
    pinnedItems(first: 6, types: [REPOSITORY]) {
      totalCount
      edges {
        node {
          ... on Repository {
            name
            description
            url
            stargazerCount
            forkCount
            owner {
              login
            }
            openGraphImageUrl
            primaryLanguage {
              name
              color
            }
            languages(first: 10, orderBy: {field: SIZE, direction: DESC}) {
              edges {
                size
                node {
                  name
                  color
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// One page of 100 public repositories, continued with `after: $cursor`.
pub const PUBLIC_REPOSITORIES_QUERY: &str = r#"
query GetAllPublicRepositories($username: String!, $cursor: String) {
  user(login: $username) {
    repositories(first: 100, privacy: PUBLIC, after: $cursor) {
      edges {
        node {
          name
          description
          url
          stargazerCount
          forkCount
          owner {
            login
          }
          openGraphImageUrl
          primaryLanguage {
            name
            color
          }
        }
      }
      pageInfo {
        endCursor
        hasNextPage
      }
    }
  }
}
"#;

/// JSON body POSTed to the GraphQL endpoint.
#[derive(Serialize, Debug)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Serialize, Debug)]
pub struct PinnedVariables<'a> {
    pub username: &'a str,
}

#[derive(Serialize, Debug)]
pub struct PublicPageVariables<'a> {
    pub username: &'a str,
    pub cursor: Option<&'a str>, // null on the first page
}

impl<'a> GraphQlRequest<'a, PinnedVariables<'a>> {
    pub fn pinned(username: &'a str) -> Self {
        Self {
            query: PINNED_REPOSITORIES_QUERY,
            variables: PinnedVariables { username },
        }
    }
}

impl<'a> GraphQlRequest<'a, PublicPageVariables<'a>> {
    pub fn public_page(username: &'a str, cursor: Option<&'a str>) -> Self {
        Self {
            query: PUBLIC_REPOSITORIES_QUERY,
            variables: PublicPageVariables { username, cursor },
        }
    }
}

/// Response envelope. Both members stay untyped until `errors` has been checked.
#[derive(Deserialize, Debug)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl GraphQlResponse {
    /// The `errors` member, if present and not `null`. An empty array still
    /// counts: GitHub only sends the member when the query failed.
    pub fn take_errors(&mut self) -> Option<Vec<GraphQlError>> {
        match self.errors.take()? {
            Value::Null => None,
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .map(GraphQlError::from_value)
                    .collect(),
            ),
            other => Some(vec![GraphQlError::from_value(other)]),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
}

impl GraphQlError {
    /// Lenient decode: entries that are not error objects keep their raw
    /// JSON as the message.
    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => {
                GraphQlError::deserialize(&value).unwrap_or_else(|_| GraphQlError {
                    message: value.to_string(),
                    ..Default::default()
                })
            }
            Value::String(message) => GraphQlError {
                message,
                ..Default::default()
            },
            other => GraphQlError {
                message: other.to_string(),
                ..Default::default()
            },
        }
    }
}
