use thiserror::Error;

/// Result type for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Failures of a single search call. None of these are retried; the host
/// re-invokes the whole program on its own schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The access token was rejected (401/403 or a FORBIDDEN GraphQL error).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The backend refused the search or GraphQL document.
    #[error("invalid search query: {0}")]
    QuerySyntax(String),

    /// Connectivity, TLS or timeout failure below the API layer.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response did not have the expected shape.
    #[error("unexpected response: {0}")]
    Protocol(String),
}

/// The closed set of search failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    QuerySyntax,
    Transport,
    Protocol,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Auth => "Authentication error",
            ErrorKind::QuerySyntax => "Query syntax error",
            ErrorKind::Transport => "Transport error",
            ErrorKind::Protocol => "Protocol error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::Auth(_) => ErrorKind::Auth,
            SearchError::QuerySyntax(_) => ErrorKind::QuerySyntax,
            SearchError::Transport(_) => ErrorKind::Transport,
            SearchError::Protocol(_) => ErrorKind::Protocol,
        }
    }

    /// The detail message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            SearchError::Auth(msg)
            | SearchError::QuerySyntax(msg)
            | SearchError::Transport(msg)
            | SearchError::Protocol(msg) => msg,
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Protocol(err.to_string())
    }
}
