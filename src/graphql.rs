use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use crate::{
    error::{SearchError, SearchResult},
    types::{PullRequest, SEARCH_PAGE_SIZE, SearchPage},
};

const SEARCH_QUERY_PLACEHOLDER: &str = "%SEARCH_QUERY%";
const PAGE_SIZE_PLACEHOLDER: &str = "%PAGE_SIZE%";

const SEARCH_DOCUMENT: &str = r#"
    {
        search(query: %SEARCH_QUERY%, type: ISSUE, first: %PAGE_SIZE%) {
            issueCount
            edges {
                node {
                    ... on PullRequest {
                        repository {
                            nameWithOwner
                        }
                        author {
                            login
                        }
                        createdAt
                        number
                        url
                        title
                        labels(first: 100) {
                            nodes {
                                name
                            }
                        }
                    }
                }
            }
        }
    }
"#;

/// GraphQL error type GitHub uses for insufficient token scopes.
const FORBIDDEN_ERROR_TYPE: &str = "FORBIDDEN";

/// Quotes `text` as a GraphQL string literal. JSON string escaping is a
/// subset of what GraphQL accepts.
fn graphql_string_literal(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// Returns the search document with `search_query` substituted in.
pub fn search_document(search_query: &str) -> String {
    SEARCH_DOCUMENT
        .replace(PAGE_SIZE_PLACEHOLDER, &SEARCH_PAGE_SIZE.to_string())
        .replace(
            SEARCH_QUERY_PLACEHOLDER,
            &graphql_string_literal(search_query),
        )
}

/// Builds the request body `{"query": <document>}` for one search.
pub fn create_search_request(search_query: &str) -> serde_json::Value {
    serde_json::json!({ "query": search_document(search_query) })
}

#[derive(Debug, Deserialize)]
struct GraphQLEnvelope {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    search: SearchResults,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResults {
    issue_count: u64,
    edges: Vec<SearchEdge>,
}

#[derive(Debug, Deserialize)]
struct SearchEdge {
    node: GraphQLPullRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQLPullRequest {
    repository: GraphQLRepository,
    author: GraphQLAuthor,
    created_at: DateTime<Utc>,
    number: u64,
    url: String,
    title: String,
    labels: GraphQLLabelConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQLRepository {
    name_with_owner: String,
}

#[derive(Debug, Deserialize)]
struct GraphQLAuthor {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GraphQLLabelConnection {
    nodes: Vec<GraphQLLabel>,
}

#[derive(Debug, Deserialize)]
struct GraphQLLabel {
    name: String,
}

fn classify_graphql_errors(errors: Vec<GraphQLError>) -> SearchError {
    let forbidden = errors
        .iter()
        .any(|e| e.error_type.as_deref() == Some(FORBIDDEN_ERROR_TYPE));
    let message = errors
        .into_iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join("; ");

    if forbidden {
        SearchError::Auth(message)
    } else {
        SearchError::QuerySyntax(message)
    }
}

fn convert_graphql_pr(node: GraphQLPullRequest) -> SearchResult<PullRequest> {
    let url = Url::parse(&node.url).map_err(|e| {
        SearchError::Protocol(format!("invalid url '{}' on #{}: {}", node.url, node.number, e))
    })?;

    Ok(PullRequest {
        repository: node.repository.name_with_owner,
        author_login: node.author.login,
        created_at: node.created_at,
        number: node.number,
        url,
        title: node.title,
        labels: node.labels.nodes.into_iter().map(|l| l.name).collect(),
    })
}

/// Decodes a raw GraphQL search response into a page of pull requests.
///
/// GraphQL `errors` take precedence over any partial data. Missing fields
/// and nulls where a value is required are protocol errors.
pub fn decode_search_response(response: serde_json::Value) -> SearchResult<SearchPage> {
    let envelope: GraphQLEnvelope = serde_json::from_value(response)?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        return Err(classify_graphql_errors(errors));
    }

    let data = envelope
        .data
        .ok_or_else(|| SearchError::Protocol("response has no data".to_string()))?;
    let data: SearchData = serde_json::from_value(data)?;

    let pull_requests = data
        .search
        .edges
        .into_iter()
        .map(|edge| convert_graphql_pr(edge.node))
        .collect::<SearchResult<Vec<_>>>()?;

    Ok(SearchPage {
        issue_count: data.search.issue_count,
        pull_requests,
    })
}
