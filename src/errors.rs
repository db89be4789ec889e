use reqwest::StatusCode;
use thiserror::Error;

use crate::graphql::GraphQlError;

/// Everything that can go wrong while fetching repositories from GitHub.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Username or access token was empty. Raised before any request is sent.
    #[error("GitHub username or access token is missing")]
    MissingCredentials,

    /// The endpoint answered with a non-success status.
    #[error("GitHub API responded with {status}")]
    Transport { status: StatusCode, body: String },

    /// The endpoint answered 2xx but the body carries a GraphQL `errors` array.
    #[error("GitHub API returned errors: {}", join_messages(.errors))]
    Api { errors: Vec<GraphQlError> },

    /// The body does not have the shape the query asks for.
    #[error("invalid data structure received from GitHub API: {reason}")]
    Schema { reason: String, payload: String },

    #[error("stopped after {limit} page(s) while GitHub still reported more")]
    PageLimitExceeded { limit: usize },

    /// Connection-level failure: no status code was ever received.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl FetchError {
    pub(crate) fn schema(reason: impl Into<String>, payload: impl Into<String>) -> Self {
        FetchError::Schema {
            reason: reason.into(),
            payload: payload.into(),
        }
    }

    /// Status code of a [`FetchError::Transport`] failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Transport { status, .. } => Some(*status),
            FetchError::Http(err) => err.status(),
            _ => None,
        }
    }
}

fn join_messages(errors: &[GraphQlError]) -> String {
    let messages: Vec<&str> = errors
        .iter()
        .map(|e| match (e.message.as_str(), e.kind.as_deref()) {
            ("", Some(kind)) => kind,
            (message, _) => message,
        })
        .filter(|m| !m.is_empty())
        .collect();
    if messages.is_empty() {
        return "no details given".to_owned();
    }
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_lists_every_message() {
        let err = FetchError::Api {
            errors: vec![
                GraphQlError {
                    message: "Could not resolve to a User".into(),
                    kind: Some("NOT_FOUND".into()),
                    path: None,
                },
                GraphQlError {
                    message: "rate limited".into(),
                    kind: None,
                    path: None,
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "GitHub API returned errors: Could not resolve to a User; rate limited"
        );
    }

    #[test]
    fn api_error_without_messages_still_displays() {
        let empty = FetchError::Api { errors: vec![] };
        assert_eq!(
            empty.to_string(),
            "GitHub API returned errors: no details given"
        );

        let kind_only = FetchError::Api {
            errors: vec![GraphQlError {
                kind: Some("RATE_LIMITED".into()),
                ..Default::default()
            }],
        };
        assert_eq!(
            kind_only.to_string(),
            "GitHub API returned errors: RATE_LIMITED"
        );
    }

    #[test]
    fn transport_error_exposes_status() {
        let err = FetchError::Transport {
            status: StatusCode::UNAUTHORIZED,
            body: "Bad credentials".into(),
        };
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(err.to_string(), "GitHub API responded with 401 Unauthorized");
        assert_eq!(FetchError::MissingCredentials.status(), None);
    }
}
