// src/crawl/stack.rs
// =============================================================================
// This module walks a website depth-first.
//
// How it works:
// 1. Start with the seed URL on a stack at depth 0
// 2. Pop an item and run the visit guard on it
// 3. Mark it visited, then fetch and extract the page
// 4. Push the page's first few links (depth + 1) so the first link is on top
// 5. Repeat until the stack is empty
//
// Because children are pushed in reverse, link 1's whole subtree is explored
// before link 2 is even looked at: a pre-order walk of the link graph.
//
// All crawl state lives in CrawlContext, owned by one call to crawl_site.
// Nothing is shared between crawls, so any number can run at once.
//
// Only one request is ever in flight per crawl. That keeps us polite to the
// target site without an explicit rate limiter.
// =============================================================================

use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;

use super::guard::{self, CrawlItem, SkipCounts, SkipReason};
use super::{CrawlOutput, PageResult};
use crate::error::CrawlError;
use crate::options::CrawlOptions;
use crate::scrape::{scrape_page, PageFetcher};

/// How many of a page's own links are followed.
pub const MAX_LINKS_PER_PAGE: usize = 5;

// Everything one crawl owns while it runs
struct CrawlContext<'a> {
    fetcher: &'a PageFetcher,
    options: &'a CrawlOptions,
    base_host: String,
    visited: HashSet<String>,
    pages: Vec<PageResult>,
    skipped: SkipCounts,
}

/// Crawls from `seed` within the limits in `options`.
///
/// Only a failure on the seed page is returned as an error; any later page
/// that fails is logged and left out.
pub(crate) async fn crawl_site(
    fetcher: &PageFetcher,
    options: &CrawlOptions,
    seed: Url,
) -> Result<CrawlOutput, CrawlError> {
    let base_host = seed.host_str().unwrap_or_default().to_string();

    let mut context = CrawlContext {
        fetcher,
        options,
        base_host,
        visited: HashSet::new(),
        pages: Vec::new(),
        skipped: SkipCounts::default(),
    };

    let mut stack = vec![CrawlItem {
        url: seed.to_string(),
        depth: 0,
    }];

    while let Some(item) = stack.pop() {
        let links = visit(&mut context, &item).await?;

        // Reverse so the first link ends up on top of the stack
        for link in links.into_iter().take(MAX_LINKS_PER_PAGE).rev() {
            stack.push(CrawlItem {
                url: link,
                depth: item.depth + 1,
            });
        }
    }

    info!(
        pages = context.pages.len(),
        attempted = context.visited.len(),
        failed = context.skipped.failed_pages,
        skipped = context.skipped.total(),
        "crawl finished"
    );

    Ok(CrawlOutput {
        pages: context.pages,
        skipped: context.skipped,
    })
}

// Guards, fetches and records one item.
// Returns the links discovered on the page (empty when skipped or failed).
async fn visit(context: &mut CrawlContext<'_>, item: &CrawlItem) -> Result<Vec<String>, CrawlError> {
    let url = match guard::check(item, &context.visited, &context.base_host, context.options) {
        Ok(url) => url,
        Err(reason) => {
            if reason == SkipReason::InvalidUrl {
                warn!(url = %item.url, "skipping invalid URL");
            } else {
                debug!(url = %item.url, depth = item.depth, ?reason, "skipping URL");
            }
            context.skipped.record(reason);
            return Ok(Vec::new());
        }
    };

    // Reserve before fetching: a page that fails still uses up budget
    context.visited.insert(item.url.clone());
    info!(depth = item.depth, url = %url, "crawling page");

    match scrape_page(context.fetcher, &url, context.options.include_images).await {
        Ok(page) => {
            let links = page.links.clone();
            context.pages.push(PageResult {
                url: item.url.clone(),
                title: page.title,
                content: page.content,
                links: page.links,
                depth: item.depth,
            });
            Ok(links)
        }
        Err(source) if item.depth == 0 => Err(CrawlError::CrawlFailed {
            url: item.url.clone(),
            source,
        }),
        Err(error) => {
            warn!(url = %item.url, %error, "failed to crawl page");
            context.skipped.failed_pages += 1;
            Ok(Vec::new())
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Vec instead of a VecDeque?
//    - push() and pop() both work on the end of a Vec, which makes it a stack
//    - A stack gives depth-first order; a queue (VecDeque) would give
//      breadth-first order
//
// 2. Why no recursion?
//    - An async fn can't call itself without boxing the future
//    - An explicit stack visits pages in exactly the order recursion would
//
// 3. Why does CrawlContext borrow the fetcher and options ('a)?
//    - They belong to the Crawler and outlive any single crawl
//    - The visited set and results are owned, so they die with the crawl
// -----------------------------------------------------------------------------
