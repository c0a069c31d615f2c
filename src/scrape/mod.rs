// src/scrape/mod.rs
// =============================================================================
// Everything needed to turn one URL into text.
//
// Submodules:
// - http: downloads the page
// - html: cleans it and finds title, content root and links
// - text: renders the content root as wrapped plain text
//
// The crawler calls scrape_page once per page. quick_scrape is the
// single-page shortcut: same pipeline, no link following, no tolerance for
// failure.
// =============================================================================

mod html;
mod http;
mod text;

pub use html::{extract_links, parse_page, ParsedPage};
pub use http::{FetchedPage, PageFetcher, MAX_REDIRECTS};
pub use text::{html_to_text, WRAP_WIDTH};

use tracing::{info, instrument};
use url::Url;

use crate::error::{CrawlError, FetchError};
use crate::options::CrawlOptions;
use crate::output;

/// Text and links extracted from one fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedPage {
    pub title: Option<String>,
    pub content: String,
    pub links: Vec<String>,
}

/// Fetches `url` and extracts its title, prose and outbound links.
pub async fn scrape_page(
    fetcher: &PageFetcher,
    url: &Url,
    include_images: bool,
) -> Result<ScrapedPage, FetchError> {
    // Step 1: download (timeouts, bad statuses and redirect loops fail here)
    let fetched = fetcher.fetch(url).await?;

    // Step 2: clean the HTML and pick out title, content root and links.
    // Relative links resolve against where the body really came from
    let parsed = parse_page(&fetched.body, &fetched.final_url, include_images);

    // Step 3: render the content root as wrapped plain text
    let content = html_to_text(&parsed.content_html)?;

    Ok(ScrapedPage {
        title: parsed.title,
        content,
        links: parsed.links,
    })
}

/// Parses a user-supplied URL into the normalized form the crawler tracks.
///
/// Only absolute http(s) URLs are accepted; the fragment is dropped since it
/// never changes what the server returns.
pub(crate) fn parse_target(raw: &str) -> Result<Url, CrawlError> {
    let invalid = |reason: String| CrawlError::InvalidSeedUrl {
        url: raw.to_string(),
        reason,
    };

    // Url::parse only accepts absolute URLs, so "/docs" fails right here
    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;

    // mailto:, ftp:, data: ... parse fine but can't be crawled
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("URL has no host".to_string()));
    }

    url.set_fragment(None);
    Ok(url)
}

/// Scrapes exactly one page with `options` and renders it as
/// `# <title>\nURL: <url>\n\n<text>`.
///
/// Any failure (bad URL, network, status, rendering) is an error: with a
/// single page there is nothing to fall back on.
#[instrument(skip(fetcher, options))]
pub(crate) async fn scrape_single(
    fetcher: &PageFetcher,
    options: &CrawlOptions,
    url: &str,
) -> Result<String, CrawlError> {
    // Reject bad URLs before any network I/O
    let target = parse_target(url)?;

    // Unlike a crawl, a failure here has nothing to fall back on
    let page = scrape_page(fetcher, &target, options.include_images)
        .await
        .map_err(|source| CrawlError::CrawlFailed {
            url: target.to_string(),
            source,
        })?;

    info!(chars = page.content.len(), "scraped page");
    Ok(output::render_single(target.as_str(), page.title.as_deref(), &page.content))
}

/// Scrapes a single page with default options. See [`crate::Crawler::quick_scrape`].
pub async fn quick_scrape(url: &str) -> Result<String, CrawlError> {
    let options = CrawlOptions::default();
    let fetcher = PageFetcher::new(&options)?;
    scrape_single(&fetcher, &options, url).await
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why pub(crate)?
//    - parse_target and scrape_single are shared with the crawl module
//    - pub(crate) makes them visible inside this crate but not to users of it
//
// 2. What does map_err do?
//    - Converts the error inside a Result into another error type
//    - Here a page-level FetchError becomes a crate-level CrawlFailed, keeping
//      the original error as its source
//
// 3. What is #[instrument]?
//    - A tracing macro that opens a span around the function
//    - Every log line inside it carries the function's arguments (the URL)
// -----------------------------------------------------------------------------
