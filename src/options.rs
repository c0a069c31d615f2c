// src/options.rs
// =============================================================================
// This module defines the knobs that bound a single crawl.
//
// Every crawl is limited in several ways at once:
// - max_depth: how many link hops away from the seed we may go
// - max_pages: how many fetches we may attempt in total
// - same_domain: whether we may leave the seed's host
// - timeout: how long a single page fetch may take
//
// CrawlOptions is immutable once a crawl starts. Library callers build it in
// code; the CLI maps its flags onto it; serde lets callers load it from JSON.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CrawlError;

/// User-Agent sent with every request. Identifies the crawler and where to
/// reach its operators.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; SiteScribeBot/1.0; +https://github.com/site-scribe/site-scribe)";

/// Limits and behavior for one crawl invocation.
///
/// Missing fields fall back to [`CrawlOptions::default`] when deserializing,
/// so `{"max_pages": 3}` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlOptions {
    /// Maximum hops from the seed (the seed itself is depth 0). Inclusive.
    pub max_depth: usize,
    /// Maximum number of fetches attempted, failed ones included.
    pub max_pages: usize,
    /// Only follow links whose host matches the seed's host.
    pub same_domain: bool,
    /// Keep image alt text in the extracted prose.
    pub include_images: bool,
    /// Per-page fetch timeout.
    #[serde(rename = "timeout_ms", with = "duration_ms")]
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_pages: 10,
            same_domain: true,
            include_images: false,
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CrawlOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_same_domain(mut self, same_domain: bool) -> Self {
        self.same_domain = same_domain;
        self
    }

    pub fn with_include_images(mut self, include_images: bool) -> Self {
        self.include_images = include_images;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Checks the bounds a crawl relies on.
    ///
    /// A crawl with `max_pages == 0` could never fetch its seed, and a zero
    /// timeout would fail every request, so both are rejected up front.
    pub fn validate(&self) -> Result<(), CrawlError> {
        // A crawl must be allowed to fetch at least its seed
        if self.max_pages == 0 {
            return Err(CrawlError::InvalidOptions(
                "max_pages must be at least 1".to_string(),
            ));
        }
        // reqwest would time out every request immediately
        if self.timeout.is_zero() {
            return Err(CrawlError::InvalidOptions(
                "timeout must be greater than zero".to_string(),
            ));
        }
        // Servers should always be able to tell who is crawling them
        if self.user_agent.trim().is_empty() {
            return Err(CrawlError::InvalidOptions(
                "user_agent must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// Durations travel as whole milliseconds in JSON
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[serde(default)] on the struct do?
//    - Any field missing from the input is taken from Default::default()
//    - So callers only write the options they want to change
//
// 2. Why do the with_* methods take `mut self`?
//    - They consume the options, change one field and hand them back
//    - That lets calls chain: CrawlOptions::default().with_max_pages(5)
//
// 3. What is the `with = "duration_ms"` attribute?
//    - serde has no built-in format for Duration that reads well in JSON
//    - It calls our serialize/deserialize functions instead
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CrawlOptions::default();
        assert_eq!(options.max_depth, 2);
        assert_eq!(options.max_pages, 10);
        assert!(options.same_domain);
        assert!(!options.include_images);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: CrawlOptions =
            serde_json::from_str(r#"{"max_pages": 3, "timeout_ms": 2500}"#).unwrap();
        assert_eq!(options.max_pages, 3);
        assert_eq!(options.timeout, Duration::from_millis(2500));
        assert_eq!(options.max_depth, 2);
        assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_zero_pages_rejected() {
        let options = CrawlOptions::default().with_max_pages(0);
        assert!(matches!(options.validate(), Err(CrawlError::InvalidOptions(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let options = CrawlOptions::default().with_timeout(Duration::ZERO);
        assert!(matches!(options.validate(), Err(CrawlError::InvalidOptions(_))));
    }

    #[test]
    fn test_zero_depth_is_valid() {
        let options = CrawlOptions::default().with_max_depth(0);
        assert!(options.validate().is_ok());
    }
}
