use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;

use crate::error::SearchResult;

/// Maximum number of matches requested per search. Larger result sets are
/// truncated by the backend.
pub const SEARCH_PAGE_SIZE: usize = 100;

/// Which of the user's pull requests a search is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchIntent {
    /// Open PRs where the login is a requested reviewer.
    ReviewRequested,
    /// Open PRs authored by the login.
    AuthoredByMe,
}

impl SearchIntent {
    /// The search qualifier that binds the login for this intent.
    pub fn qualifier(&self) -> &'static str {
        match self {
            SearchIntent::ReviewRequested => "review-requested",
            SearchIntent::AuthoredByMe => "author",
        }
    }
}

/// A pull request as returned by the search, read-only for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Repository in `owner/name` form.
    pub repository: String,
    pub author_login: String,
    pub created_at: DateTime<Utc>,
    pub number: u64,
    pub url: Url,
    pub title: String,
    pub labels: BTreeSet<String>,
}

impl PullRequest {
    /// The owner part of the repository name: everything before the first
    /// `/`, or the whole name when there is no `/`.
    pub fn org(&self) -> &str {
        self.repository
            .split_once('/')
            .map_or(self.repository.as_str(), |(owner, _)| owner)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Total matches reported by the backend, possibly more than were
    /// returned.
    pub issue_count: u64,
    pub pull_requests: Vec<PullRequest>,
}

impl SearchPage {
    pub fn is_truncated(&self) -> bool {
        self.issue_count > self.pull_requests.len() as u64
    }
}

/// A code-hosting backend that can run a pull request search.
#[async_trait]
pub trait Forge {
    /// Runs one search and returns the first page of matches.
    async fn search(&self, query: &str) -> SearchResult<SearchPage>;
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn pr(repository: &str) -> PullRequest {
        PullRequest {
            repository: repository.to_string(),
            author_login: "alice".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
            number: 1,
            url: Url::parse("https://github.com/acme/widgets/pull/1").unwrap(),
            title: "Fix bug".to_string(),
            labels: BTreeSet::from(["WIP".to_string()]),
        }
    }

    #[test]
    fn test_org_is_prefix_before_first_slash() {
        assert_eq!(pr("acme/widgets").org(), "acme");
        assert_eq!(pr("acme/widgets/extra").org(), "acme");
    }

    #[test]
    fn test_org_without_slash_is_whole_name() {
        assert_eq!(pr("acme").org(), "acme");
        assert_eq!(pr("").org(), "");
    }

    #[test]
    fn test_has_label_exact_match() {
        let pr = pr("acme/widgets");
        assert!(pr.has_label("WIP"));
        assert!(!pr.has_label("wip"));
    }

    #[test]
    fn test_intent_qualifiers() {
        assert_eq!(SearchIntent::ReviewRequested.qualifier(), "review-requested");
        assert_eq!(SearchIntent::AuthoredByMe.qualifier(), "author");
    }

    #[test]
    fn test_page_truncation() {
        let page = SearchPage {
            issue_count: 150,
            pull_requests: vec![pr("acme/widgets")],
        };
        assert!(page.is_truncated());
        assert!(!SearchPage::default().is_truncated());
    }
}
