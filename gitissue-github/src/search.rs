//! Paginated issue search
//!
//! Search results arrive in pages; each response names the following
//! page in its `Link` header (`<url>; rel="next"`). The loop here
//! follows that chain sequentially and merges the pages into one
//! result. The next URL is only known once the prior response is in
//! hand, so there is nothing to parallelize.

use reqwest::header::LINK;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::expect_status;
use crate::issues::Issue;
use crate::{Error, GitHubClient, Result};

/// Safety cap on followed pages; a chain longer than this is treated as
/// a misbehaving (or cyclic) next-link rather than a real result set.
const MAX_SEARCH_PAGES: usize = 100;

/// Aggregated result of a paginated search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    /// Total matches reported by the service (taken from the first page)
    pub total_count: u64,
    /// Matched issues in the order the service returned them
    ///
    /// May hold fewer than `total_count` entries when the service
    /// truncates deep result sets.
    #[serde(default)]
    pub items: Vec<Issue>,
}

impl GitHubClient {
    /// Search this repository's issues, following pagination to exhaustion
    ///
    /// The query is `repo:{owner}/{repo}` plus ` is:{filter}` when a
    /// filter is given. Any page failing with a non-200 status aborts
    /// the whole search; accumulated pages are discarded, never
    /// returned partially.
    pub async fn search_issues(&self, filter: Option<&str>) -> Result<SearchResults> {
        let mut next = Some(search_url(
            self.api_base(),
            self.owner(),
            self.repo(),
            filter,
        ));
        let mut results = SearchResults {
            total_count: 0,
            items: Vec::new(),
        };
        let mut pages = 0usize;

        while let Some(url) = next.take() {
            if pages == MAX_SEARCH_PAGES {
                return Err(Error::TooManyPages(MAX_SEARCH_PAGES));
            }
            pages += 1;
            debug!(%url, page = pages, "fetching search page");

            let response = self.send(Method::GET, &url, None).await?;
            let response = expect_status(response, StatusCode::OK).await?;

            next = response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_page_url);

            let body = response.text().await?;
            let page: SearchResults = serde_json::from_str(&body)?;

            // The service reports the same total on every page of one
            // query; the first page's value is authoritative.
            if pages == 1 {
                results.total_count = page.total_count;
            }
            results.items.extend(page.items);
        }

        info!(
            total = results.total_count,
            returned = results.items.len(),
            pages,
            "search complete"
        );
        Ok(results)
    }
}

/// Build the first-page search URL for a repository query
fn search_url(api_base: &str, owner: &str, repo: &str, filter: Option<&str>) -> String {
    let mut query = format!("repo:{owner}/{repo}");
    if let Some(filter) = filter.filter(|f| !f.is_empty()) {
        query.push_str(" is:");
        query.push_str(filter);
    }
    let escaped: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{api_base}/search/issues?q={escaped}&page=1")
}

/// Extract the `rel="next"` URL from a `Link` header value
///
/// Presence of "next" in the header is the continuation signal; the URL
/// is the header's first `<...>`-wrapped segment.
fn next_page_url(link: &str) -> Option<String> {
    if !link.contains("next") {
        return None;
    }
    let first = link.split(';').next()?;
    Some(
        first
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .to_string(),
    )
}
