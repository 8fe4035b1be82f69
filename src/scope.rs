//! Organisation, repository and author allow-lists.

use std::collections::HashSet;

use crate::types::PullRequest;

/// Which pull requests to show and how to mark work in progress.
///
/// An empty target set leaves that dimension unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeConfig {
    pub target_orgs: HashSet<String>,
    pub target_repos: HashSet<String>,
    pub target_users: HashSet<String>,
    /// Label that greys out an entry. Empty disables the rule.
    pub wip_label: String,
    /// Free-text search terms appended to every query.
    pub extra_search_filters: String,
}

impl ScopeConfig {
    /// True when every dimension is unrestricted.
    pub fn is_unrestricted(&self) -> bool {
        self.target_orgs.is_empty() && self.target_repos.is_empty() && self.target_users.is_empty()
    }

    /// Tests a pull request against all three allow-lists.
    ///
    /// Only the author is compared against `target_users`; reviewers and
    /// commenters are not considered.
    pub fn includes(&self, pr: &PullRequest) -> bool {
        matches_set(&self.target_orgs, pr.org())
            && matches_set(&self.target_repos, &pr.repository)
            && matches_set(&self.target_users, &pr.author_login)
    }

    pub fn is_wip(&self, pr: &PullRequest) -> bool {
        !self.wip_label.is_empty() && pr.has_label(&self.wip_label)
    }
}

fn matches_set(targets: &HashSet<String>, value: &str) -> bool {
    targets.is_empty() || targets.contains(value)
}

/// Keeps the pull requests in scope, preserving their order.
pub fn apply_scope(prs: Vec<PullRequest>, scope: &ScopeConfig) -> Vec<PullRequest> {
    if scope.is_unrestricted() {
        return prs;
    }

    prs.into_iter().filter(|pr| scope.includes(pr)).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{TimeZone, Utc};
    use url::Url;

    use super::*;

    fn pr(number: u64, repository: &str, author: &str) -> PullRequest {
        PullRequest {
            repository: repository.to_string(),
            author_login: author.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
            number,
            url: Url::parse(&format!("https://github.com/{repository}/pull/{number}")).unwrap(),
            title: format!("PR {number}"),
            labels: BTreeSet::new(),
        }
    }

    fn set(values: &[&str]) -> HashSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample() -> Vec<PullRequest> {
        vec![
            pr(1, "acme/widgets", "alice"),
            pr(2, "other/tools", "bob"),
            pr(3, "acme/gadgets", "bob"),
            pr(4, "acme", "carol"),
        ]
    }

    fn numbers(prs: &[PullRequest]) -> Vec<u64> {
        prs.iter().map(|pr| pr.number).collect()
    }

    #[test]
    fn test_unrestricted_is_identity() {
        let prs = sample();
        assert_eq!(apply_scope(prs.clone(), &ScopeConfig::default()), prs);
    }

    #[test]
    fn test_org_filter_uses_owner_only() {
        let scope = ScopeConfig {
            target_orgs: set(&["acme"]),
            ..Default::default()
        };
        assert_eq!(numbers(&apply_scope(sample(), &scope)), vec![1, 3, 4]);
    }

    #[test]
    fn test_org_filter_ignores_full_name() {
        let scope = ScopeConfig {
            target_orgs: set(&["acme/widgets"]),
            ..Default::default()
        };
        assert!(apply_scope(sample(), &scope).is_empty());
    }

    #[test]
    fn test_malformed_repository_only_matches_whole_name() {
        let scope = ScopeConfig {
            target_orgs: set(&["other"]),
            ..Default::default()
        };
        let prs = vec![pr(9, "acme", "alice")];
        assert!(apply_scope(prs, &scope).is_empty());
    }

    #[test]
    fn test_repo_filter_exact_full_name() {
        let scope = ScopeConfig {
            target_repos: set(&["acme/gadgets", "other/tools"]),
            ..Default::default()
        };
        assert_eq!(numbers(&apply_scope(sample(), &scope)), vec![2, 3]);
    }

    #[test]
    fn test_user_filter_matches_author() {
        let scope = ScopeConfig {
            target_users: set(&["bob"]),
            ..Default::default()
        };
        assert_eq!(numbers(&apply_scope(sample(), &scope)), vec![2, 3]);
    }

    #[test]
    fn test_dimensions_are_anded() {
        let scope = ScopeConfig {
            target_orgs: set(&["acme"]),
            target_users: set(&["bob"]),
            ..Default::default()
        };
        assert_eq!(numbers(&apply_scope(sample(), &scope)), vec![3]);

        let scope = ScopeConfig {
            target_orgs: set(&["acme"]),
            target_repos: set(&["other/tools"]),
            ..Default::default()
        };
        assert!(apply_scope(sample(), &scope).is_empty());
    }

    #[test]
    fn test_filter_preserves_order() {
        let mut prs = sample();
        prs.reverse();
        let scope = ScopeConfig {
            target_orgs: set(&["acme"]),
            ..Default::default()
        };
        assert_eq!(numbers(&apply_scope(prs, &scope)), vec![4, 3, 1]);
    }

    #[test]
    fn test_wip_requires_non_empty_label() {
        let mut wip = pr(1, "acme/widgets", "alice");
        wip.labels.insert("WIP".to_string());

        let scope = ScopeConfig::default();
        assert!(!scope.is_wip(&wip));

        let scope = ScopeConfig {
            wip_label: "WIP".to_string(),
            ..Default::default()
        };
        assert!(scope.is_wip(&wip));
        assert!(!scope.is_wip(&pr(2, "acme/widgets", "alice")));
    }
}
