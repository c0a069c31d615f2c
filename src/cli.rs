// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is a thin front end over the library: every crawl flag maps onto
// one CrawlOptions field.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use site_scribe::CrawlOptions;

#[derive(Parser, Debug)]
#[command(
    name = "site-scribe",
    version = "0.1.0",
    about = "Crawl a website and extract its readable text",
    long_about = "site-scribe walks a website from a seed URL, strips navigation and markup, \
                  and prints the text of every page it reached, ready to feed into a knowledge base."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl one or more sites, following links from each seed
    ///
    /// Example: site-scribe crawl https://example.com --max-depth 1
    Crawl {
        /// Seed URLs. Each one is crawled independently.
        #[arg(required = true)]
        seeds: Vec<String>,

        #[command(flatten)]
        limits: CrawlArgs,

        /// Print pages and skip counts as JSON instead of text
        #[arg(long)]
        json: bool,

        /// How many seeds to crawl at the same time
        #[arg(long, default_value_t = 4)]
        concurrency: usize,
    },

    /// Extract the text of a single page without following links
    ///
    /// Example: site-scribe scrape https://example.com/pricing
    Scrape {
        url: String,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Maximum link hops from the seed (0 = seed only)
    #[arg(long, default_value_t = 2)]
    pub max_depth: usize,

    /// Maximum number of pages fetched per seed
    #[arg(long, default_value_t = 10)]
    pub max_pages: usize,

    /// Follow links to other hosts too
    #[arg(long)]
    pub allow_external: bool,

    /// Keep image alt text in the output
    #[arg(long)]
    pub include_images: bool,

    /// Per-page timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl CrawlArgs {
    pub fn to_options(&self) -> CrawlOptions {
        CrawlOptions::default()
            .with_max_depth(self.max_depth)
            .with_max_pages(self.max_pages)
            .with_same_domain(!self.allow_external)
            .with_include_images(self.include_images)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_defaults_match_library() {
        let cli = Cli::parse_from(["site-scribe", "crawl", "https://example.com"]);
        let Commands::Crawl { seeds, limits, json, concurrency } = cli.command else {
            panic!("expected crawl command");
        };
        assert_eq!(seeds, vec!["https://example.com"]);
        assert!(!json);
        assert_eq!(concurrency, 4);
        assert_eq!(limits.to_options(), CrawlOptions::default());
    }

    #[test]
    fn test_crawl_flags() {
        let cli = Cli::parse_from([
            "site-scribe",
            "crawl",
            "https://a.example",
            "https://b.example",
            "--max-depth",
            "0",
            "--max-pages",
            "3",
            "--allow-external",
            "--timeout-secs",
            "5",
        ]);
        let Commands::Crawl { seeds, limits, .. } = cli.command else {
            panic!("expected crawl command");
        };
        assert_eq!(seeds.len(), 2);

        let options = limits.to_options();
        assert_eq!(options.max_depth, 0);
        assert_eq!(options.max_pages, 3);
        assert!(!options.same_domain);
        assert_eq!(options.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_crawl_requires_seed() {
        assert!(Cli::try_parse_from(["site-scribe", "crawl"]).is_err());
    }
}
