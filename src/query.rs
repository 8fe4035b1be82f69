use tracing::{debug, warn};

use crate::{
    cli::{Config, Credentials},
    display::{missing_credentials_menu, render_menu, search_error_menu},
    error::SearchResult,
    menu::MenuLine,
    scope::apply_scope,
    search::build_search_query,
    types::{Forge, PullRequest, SearchIntent},
};

/// Runs one search for `intent` and keeps only the results in scope.
async fn search_in_scope<F>(
    forge: &F,
    config: &Config,
    credentials: Credentials<'_>,
    intent: SearchIntent,
) -> SearchResult<Vec<PullRequest>>
where
    F: Forge + Sync,
{
    let query = build_search_query(
        intent,
        credentials.login,
        &config.scope.extra_search_filters,
    );
    let page = forge.search(&query).await?;
    let returned = page.pull_requests.len();
    let in_scope = apply_scope(page.pull_requests, &config.scope);

    debug!(
        ?intent,
        issue_count = page.issue_count,
        returned,
        in_scope = in_scope.len(),
        "Search complete"
    );

    Ok(in_scope)
}

/// Produces the full menu for one invocation.
///
/// Without credentials no search is attempted and a configuration warning
/// is returned instead. Search failures are rendered as an error menu, so
/// the result is never empty.
pub async fn run<F>(config: &Config, forge: &F) -> Vec<MenuLine>
where
    F: Forge + Sync,
{
    let Some(credentials) = config.credentials() else {
        warn!("Access token or login not configured");
        return missing_credentials_menu();
    };

    let searches = async {
        let review_requested =
            search_in_scope(forge, config, credentials, SearchIntent::ReviewRequested).await?;
        let authored =
            search_in_scope(forge, config, credentials, SearchIntent::AuthoredByMe).await?;
        SearchResult::Ok((review_requested, authored))
    };

    match searches.await {
        Ok((review_requested, authored)) => render_menu(
            &review_requested,
            &authored,
            &config.scope,
            config.dark_mode,
        ),
        Err(err) => {
            warn!(kind = %err.kind(), "Search failed: {err}");
            search_error_menu(&err)
        }
    }
}
