// src/crawl/guard.rs
// =============================================================================
// The visit guard: the checks a candidate URL must pass before we spend a
// request on it.
//
// Checks run in a fixed order and the first failure wins:
//   a. too deep
//   b. page budget used up
//   c. already visited (or attempted)
//   d. not an absolute URL
//   e. different host from the seed (when same_domain is on)
//
// A skip is never an error. We do record why it happened, so callers can see
// what a crawl left out.
// =============================================================================

use serde::Serialize;
use std::collections::HashSet;
use url::Url;

use crate::options::CrawlOptions;

/// A URL waiting to be visited, with its distance from the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CrawlItem {
    pub url: String,
    pub depth: usize,
}

/// Why the guard turned a URL away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    TooDeep,
    PageBudget,
    AlreadyVisited,
    InvalidUrl,
    OffDomain,
}

/// How many candidates each guard check rejected, plus fetches that failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub too_deep: usize,
    pub page_budget: usize,
    pub already_visited: usize,
    pub invalid_url: usize,
    pub off_domain: usize,
    /// Pages that passed the guard but could not be fetched or converted.
    pub failed_pages: usize,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::TooDeep => self.too_deep += 1,
            SkipReason::PageBudget => self.page_budget += 1,
            SkipReason::AlreadyVisited => self.already_visited += 1,
            SkipReason::InvalidUrl => self.invalid_url += 1,
            SkipReason::OffDomain => self.off_domain += 1,
        }
    }

    /// Candidates rejected by the guard (failed fetches not included).
    pub fn total(&self) -> usize {
        self.too_deep + self.page_budget + self.already_visited + self.invalid_url + self.off_domain
    }
}

/// Runs the visit guard for `item`. On success returns the parsed URL to fetch.
pub(crate) fn check(
    item: &CrawlItem,
    visited: &HashSet<String>,
    base_host: &str,
    options: &CrawlOptions,
) -> Result<Url, SkipReason> {
    // a. Too far from the seed (max_depth itself is allowed)
    if item.depth > options.max_depth {
        return Err(SkipReason::TooDeep);
    }
    // b. Budget spent: failed fetches count too
    if visited.len() >= options.max_pages {
        return Err(SkipReason::PageBudget);
    }
    // c. Never fetch the same URL twice in one crawl
    if visited.contains(&item.url) {
        return Err(SkipReason::AlreadyVisited);
    }

    // d. Must be an absolute URL
    let url = Url::parse(&item.url).map_err(|_| SkipReason::InvalidUrl)?;

    // e. Host only: port and scheme don't matter
    if options.same_domain && url.host_str() != Some(base_host) {
        return Err(SkipReason::OffDomain);
    }

    Ok(url)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why return Result<Url, SkipReason> instead of bool?
//    - The caller gets the parsed URL on success, so it doesn't parse twice
//    - On a skip it learns why, which feeds the logs and SkipCounts
//
// 2. Why does the order of checks matter?
//    - The first failing check decides the SkipReason that gets counted
//    - The cheap checks (numbers, set lookups) run before URL parsing
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn item(url: &str, depth: usize) -> CrawlItem {
        CrawlItem {
            url: url.to_string(),
            depth,
        }
    }

    #[test]
    fn test_passes_fresh_same_domain_url() {
        let url = check(
            &item("https://example.com/a", 1),
            &HashSet::new(),
            "example.com",
            &CrawlOptions::default(),
        )
        .unwrap();
        assert_eq!(url.path(), "/a");
    }

    #[test]
    fn test_max_depth_is_inclusive() {
        let options = CrawlOptions::default().with_max_depth(1);
        let visited = HashSet::new();
        assert!(check(&item("https://example.com/a", 1), &visited, "example.com", &options).is_ok());
        assert_eq!(
            check(&item("https://example.com/a", 2), &visited, "example.com", &options),
            Err(SkipReason::TooDeep)
        );
    }

    #[test]
    fn test_budget_checked_before_duplicates() {
        let options = CrawlOptions::default().with_max_pages(1);
        let visited = HashSet::from(["https://example.com/a".to_string()]);
        assert_eq!(
            check(&item("https://example.com/a", 0), &visited, "example.com", &options),
            Err(SkipReason::PageBudget)
        );
    }

    #[test]
    fn test_already_visited() {
        let visited = HashSet::from(["https://example.com/a".to_string()]);
        assert_eq!(
            check(
                &item("https://example.com/a", 1),
                &visited,
                "example.com",
                &CrawlOptions::default()
            ),
            Err(SkipReason::AlreadyVisited)
        );
    }

    #[test]
    fn test_invalid_url() {
        assert_eq!(
            check(&item("::not a url", 1), &HashSet::new(), "example.com", &CrawlOptions::default()),
            Err(SkipReason::InvalidUrl)
        );
    }

    #[test]
    fn test_off_domain_only_when_restricted() {
        let candidate = item("https://blog.example.com/post", 1);
        assert_eq!(
            check(&candidate, &HashSet::new(), "example.com", &CrawlOptions::default()),
            Err(SkipReason::OffDomain)
        );

        let open = CrawlOptions::default().with_same_domain(false);
        assert!(check(&candidate, &HashSet::new(), "example.com", &open).is_ok());
    }

    #[test]
    fn test_skip_counts() {
        let mut counts = SkipCounts::default();
        counts.record(SkipReason::TooDeep);
        counts.record(SkipReason::TooDeep);
        counts.record(SkipReason::OffDomain);
        counts.failed_pages += 1;
        assert_eq!(counts.too_deep, 2);
        assert_eq!(counts.off_domain, 1);
        assert_eq!(counts.total(), 3);
    }
}
