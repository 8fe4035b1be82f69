use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{SearchError, SearchResult},
    graphql::{create_search_request, decode_search_response},
    types::{Forge, SEARCH_PAGE_SIZE, SearchPage},
};

/// GitHub search over the GraphQL API, authenticated with a personal
/// access token.
#[derive(Debug, Clone)]
pub struct GitHub {
    octocrab: Octocrab,
}

impl GitHub {
    /// Creates a client for `token`. No request is made until the first
    /// search.
    pub fn new(token: &str) -> Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .context("Failed to create GitHub client")?;
        Ok(Self { octocrab })
    }
}

#[async_trait]
impl Forge for GitHub {
    async fn search(&self, query: &str) -> SearchResult<SearchPage> {
        debug!(query, "Running GitHub search");

        let request = create_search_request(query);
        let response = self
            .octocrab
            ._post("/graphql", Some(&request))
            .await
            .map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(transport_error)?;
        let page = decode_http_response(status, &body)?;

        if page.is_truncated() {
            debug!(
                issue_count = page.issue_count,
                returned = page.pull_requests.len(),
                limit = SEARCH_PAGE_SIZE,
                "Search results truncated"
            );
        }

        Ok(page)
    }
}

/// Maps an HTTP error status from the API to a search error.
pub fn classify_status(status: u16, message: String) -> SearchError {
    match status {
        401 | 403 => SearchError::Auth(message),
        400 | 422 => SearchError::QuerySyntax(message),
        _ => SearchError::Transport(format!("HTTP {status}: {message}")),
    }
}

fn transport_error(err: octocrab::Error) -> SearchError {
    SearchError::Transport(err.to_string())
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Classifies a raw API response by status first; only a successful body
/// is decoded as a search result.
pub fn decode_http_response(status: u16, body: &str) -> SearchResult<SearchPage> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| "non-JSON error body".to_string());
        return Err(classify_status(status, message));
    }

    let response: serde_json::Value = serde_json::from_str(body)?;
    decode_search_response(response)
}
