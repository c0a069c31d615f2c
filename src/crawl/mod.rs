// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling starting from a seed URL
// - Same-domain restriction (doesn't wander onto other sites)
// - Limits on depth, total pages and links followed per page
// - Pages that fail are skipped; only a failing seed aborts the crawl
//
// Submodules:
// - guard: the checks a URL must pass before it is fetched
// - stack: the traversal itself
// =============================================================================

mod guard;
mod stack;

pub use guard::{SkipCounts, SkipReason};
pub use stack::MAX_LINKS_PER_PAGE;

use serde::Serialize;
use tracing::{info_span, Instrument};

use crate::error::CrawlError;
use crate::options::CrawlOptions;
use crate::output;
use crate::scrape::{self, PageFetcher};

/// One successfully crawled page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub url: String,
    pub title: Option<String>,
    /// Extracted plain text.
    pub content: String,
    /// Every crawlable link on the page, not just the ones followed.
    pub links: Vec<String>,
    /// Hops from the seed.
    pub depth: usize,
}

/// Everything a crawl produced, pages in the order they were fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlOutput {
    pub pages: Vec<PageResult>,
    pub skipped: SkipCounts,
}

impl CrawlOutput {
    /// The text blob handed to the embedder. See [`output::render_pages`].
    pub fn render(&self) -> String {
        output::render_pages(&self.pages)
    }
}

/// A reusable crawler.
///
/// Holds only configuration and an HTTP client; every crawl gets its own
/// visited set and results, so one `Crawler` can serve many crawls at once.
///
/// ```no_run
/// # async fn demo() -> Result<(), site_scribe::CrawlError> {
/// use site_scribe::{CrawlOptions, Crawler};
///
/// let crawler = Crawler::new(CrawlOptions::default().with_max_pages(5))?;
/// let text = crawler.crawl("https://example.com/").await?;
/// println!("{}", text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Crawler {
    options: CrawlOptions,
    fetcher: PageFetcher,
}

impl Crawler {
    pub fn new(options: CrawlOptions) -> Result<Self, CrawlError> {
        options.validate()?;
        let fetcher = PageFetcher::new(&options)?;
        Ok(Self { options, fetcher })
    }

    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    /// Crawls from `seed_url` and returns the structured results.
    pub async fn crawl_pages(&self, seed_url: &str) -> Result<CrawlOutput, CrawlError> {
        let seed = scrape::parse_target(seed_url)?;
        let span = info_span!("crawl", seed = %seed);

        stack::crawl_site(&self.fetcher, &self.options, seed)
            .instrument(span)
            .await
    }

    /// Crawls from `seed_url` and returns all page texts as one string.
    ///
    /// Returns an empty string when no page could be extracted. Fails with
    /// [`CrawlError::InvalidSeedUrl`] before any request if the seed is not an
    /// absolute http(s) URL, and with [`CrawlError::CrawlFailed`] if the seed
    /// page itself cannot be fetched.
    pub async fn crawl(&self, seed_url: &str) -> Result<String, CrawlError> {
        let output = self.crawl_pages(seed_url).await?;
        Ok(output.render())
    }

    /// Fetches and extracts a single page without following any links.
    pub async fn quick_scrape(&self, url: &str) -> Result<String, CrawlError> {
        scrape::scrape_single(&self.fetcher, &self.options, url).await
    }
}

/// One-shot crawl with a fresh [`Crawler`].
pub async fn crawl(seed_url: &str, options: CrawlOptions) -> Result<String, CrawlError> {
    Crawler::new(options)?.crawl(seed_url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn site(pages: &[(&str, &str)]) -> MockServer {
        let server = MockServer::start().await;
        for (route, body) in pages {
            Mock::given(method("GET"))
                .and(path(*route))
                .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html"))
                .mount(&server)
                .await;
        }
        server
    }

    #[tokio::test]
    async fn test_invalid_seed_rejected() {
        let result = crawl("example.com/no-scheme", CrawlOptions::default()).await;
        assert!(matches!(result, Err(CrawlError::InvalidSeedUrl { .. })));
    }

    #[tokio::test]
    async fn test_invalid_options_rejected() {
        let result = crawl("https://example.com/", CrawlOptions::default().with_max_pages(0)).await;
        assert!(matches!(result, Err(CrawlError::InvalidOptions(_))));
    }

    #[tokio::test]
    async fn test_crawl_renders_sections() {
        let server = site(&[
            ("/", r#"<title>Home</title><main><p>Hello.</p><a href="/about">About us</a></main>"#),
            ("/about", "<main><h1>About</h1><p>We build things.</p></main>"),
        ])
        .await;

        let text = crawl(&format!("{}/", server.uri()), CrawlOptions::default()).await.unwrap();

        let expected_start = format!("=== Page 1: Home ===\nURL: {}/\n\nHello.", server.uri());
        assert!(text.starts_with(&expected_start), "{}", text);
        assert!(text.contains(&format!("\n\n=== Page 2: About ===\nURL: {}/about\n\n", server.uri())));
        assert!(text.contains("We build things."));
    }

    #[tokio::test]
    async fn test_crawler_is_reusable() {
        let server = site(&[("/", "<title>Only</title><p>Same every time.</p>")]).await;
        let crawler = Crawler::new(CrawlOptions::default()).unwrap();
        let seed = format!("{}/", server.uri());

        let first = crawler.crawl(&seed).await.unwrap();
        let second = crawler.crawl(&seed).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(second.matches("=== Page ").count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_crawls_are_isolated() {
        let left = site(&[
            ("/", r#"<title>Left</title><a href="/l">l</a>"#),
            ("/l", "<title>Left child</title>"),
        ])
        .await;
        let right = site(&[("/", "<title>Right</title>")]).await;

        let crawler = Crawler::new(CrawlOptions::default()).unwrap();
        let left_seed = format!("{}/", left.uri());
        let right_seed = format!("{}/", right.uri());

        let (left_output, right_output) =
            tokio::join!(crawler.crawl_pages(&left_seed), crawler.crawl_pages(&right_seed));
        let (left_output, right_output) = (left_output.unwrap(), right_output.unwrap());

        assert_eq!(left_output.pages.len(), 2);
        assert_eq!(right_output.pages.len(), 1);
        assert_eq!(right_output.pages[0].title.as_deref(), Some("Right"));
    }

    #[tokio::test]
    async fn test_quick_scrape_uses_crawler_options() {
        let server = site(&[("/", r#"<main><p>Chart below</p><img src="/c.png" alt="sales chart"></main>"#)]).await;
        let seed = format!("{}/", server.uri());

        let crawler = Crawler::new(CrawlOptions::default().with_include_images(false)).unwrap();
        let text = crawler.quick_scrape(&seed).await.unwrap();
        assert!(text.starts_with(&format!("# {}\nURL: {}\n\n", seed, seed)));
        assert!(text.contains("Chart below"));
        assert!(!text.contains("sales chart"));
    }
}
