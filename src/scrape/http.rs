// src/scrape/http.rs
// =============================================================================
// This module downloads pages.
//
// Key functionality:
// - One reqwest Client per crawler, reused for every page (connection pooling)
// - Per-request timeout taken from CrawlOptions
// - A User-Agent that says who we are
// - At most 5 redirects, after which the page counts as failed
// - Any non-2xx status is a failure
// =============================================================================

use reqwest::{redirect::Policy, Client};
use url::Url;

use crate::error::{CrawlError, FetchError};
use crate::options::CrawlOptions;

/// Redirect hops followed before a page is given up on.
pub const MAX_REDIRECTS: usize = 5;

/// A successfully downloaded page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Where the body actually came from, after redirects.
    pub final_url: Url,
    pub body: String,
}

/// HTTP GET with the crawl's timeout, User-Agent and redirect budget.
///
/// Cloning is cheap: the underlying client is reference counted.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(options: &CrawlOptions) -> Result<Self, CrawlError> {
        // Build the client once; every page of the crawl reuses it
        let client = Client::builder()
            .timeout(options.timeout)  // per request, not per crawl
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(options.user_agent.as_str())  // an invalid header value fails build()
            .build()
            .map_err(CrawlError::Client)?;

        Ok(Self { client })
    }

    /// Fetches `url` and returns its body as text.
    ///
    /// Network errors, timeouts, exhausted redirects and non-success statuses
    /// all come back as a FetchError; the caller decides whether that is fatal.
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        // The ? converts reqwest::Error into FetchError (see error.rs)
        let response = self.client.get(url.clone()).send().await?;

        // 4xx and 5xx still arrive as a response, so check the status ourselves
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // After redirects, response.url() is where we actually ended up
        let final_url = response.url().clone();

        // Reading the body can still time out or fail mid-stream
        let body = response.text().await?;

        Ok(FetchedPage { final_url, body })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why keep one Client instead of calling reqwest::get()?
//    - A Client holds a connection pool
//    - Pages on the same site reuse open connections instead of reconnecting
//
// 2. What does Policy::limited(5) do?
//    - reqwest follows up to 5 redirects on its own
//    - One more and the request fails with a redirect error
//
// 3. Why url.clone() in get()?
//    - get() takes the URL by value; we only borrowed it
//    - Cloning a Url is just copying a short string
// -----------------------------------------------------------------------------
