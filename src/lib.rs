// src/lib.rs
// =============================================================================
// site-scribe: turns a website into plain text for a knowledge base.
//
// Give it a seed URL and some limits; it walks the site depth-first, pulls
// the readable text out of each page and hands back one string, ready to be
// embedded and stored by whoever called it.
//
// Modules:
// - options: CrawlOptions (depth, page budget, same-domain, timeout, ...)
// - crawl: the Crawler and its traversal
// - scrape: fetching and extracting a single page
// - output: the text format crawls are rendered into
// - error: CrawlError and FetchError
// =============================================================================

pub mod crawl;
pub mod error;
pub mod options;
pub mod output;
pub mod scrape;

pub use crawl::{crawl, CrawlOutput, Crawler, PageResult, SkipCounts, SkipReason};
pub use error::{CrawlError, FetchError};
pub use options::CrawlOptions;
pub use scrape::quick_scrape;
