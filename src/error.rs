// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// There are two levels of failure:
// - CrawlError: the whole operation failed (bad seed, bad options, or the
//   seed page itself could not be fetched). Returned to the caller.
// - FetchError: one page failed. For any page other than the seed this is
//   logged and the crawl carries on without it.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

/// A failure that aborts a whole crawl (or a single-page scrape).
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed is not an absolute http(s) URL. No request was made.
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeedUrl { url: String, reason: String },

    #[error("invalid crawl options: {0}")]
    InvalidOptions(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The first page could not be fetched or converted to text.
    #[error("crawl of {url} failed: {source}")]
    CrawlFailed {
        url: String,
        #[source]
        source: FetchError,
    },
}

/// Why a single page produced no result.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("could not convert page to text: {0}")]
    Render(String),
}

impl From<reqwest::Error> for FetchError {
    // Sort reqwest's catch-all error into the cases callers care about
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_redirect() {
            FetchError::TooManyRedirects
        } else if let Some(status) = error.status() {
            FetchError::Status(status)
        } else {
            FetchError::Transport(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_failed_mentions_cause() {
        let error = CrawlError::CrawlFailed {
            url: "https://example.com/".to_string(),
            source: FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR),
        };
        let message = error.to_string();
        assert!(message.contains("https://example.com/"));
        assert!(message.contains("500"));
    }

    #[test]
    fn test_crawl_failed_exposes_source() {
        use std::error::Error as _;

        let error = CrawlError::CrawlFailed {
            url: "https://example.com/".to_string(),
            source: FetchError::Timeout,
        };
        let source = error.source().expect("CrawlFailed wraps its cause");
        assert_eq!(source.to_string(), "request timed out");
    }
}
