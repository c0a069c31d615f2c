// src/main.rs
// =============================================================================
// Entry point of the site-scribe CLI.
//
// What happens here:
// 1. Set up logging (stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the crawl or scrape handler
// 4. Exit with proper code (0 = success, 2 = at least one crawl failed)
//
// Logs go to stderr so stdout only ever carries the extracted text or JSON.
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, CrawlArgs};
use site_scribe::{CrawlError, CrawlOptions, CrawlOutput, Crawler};

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,site_scribe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            seeds,
            limits,
            json,
            concurrency,
        } => handle_crawl(&seeds, &limits, json, concurrency).await,
        Commands::Scrape { url, timeout_secs } => handle_scrape(&url, timeout_secs).await,
    }
}

// What we print per seed in --json mode
#[derive(Serialize)]
struct SeedReport<'a> {
    seed: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a CrawlOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// Crawls every seed, at most `concurrency` at a time.
// Each seed gets its own crawl state; the crawler itself is shared.
async fn handle_crawl(seeds: &[String], limits: &CrawlArgs, json: bool, concurrency: usize) -> Result<i32> {
    let crawler = Crawler::new(limits.to_options()).context("Invalid crawl settings")?;

    tracing::info!(
        seeds = seeds.len(),
        max_depth = limits.max_depth,
        max_pages = limits.max_pages,
        "starting crawl"
    );

    // `buffered` keeps results in seed order even though crawls overlap
    let results: Vec<Result<CrawlOutput, CrawlError>> = stream::iter(seeds)
        .map(|seed| crawler.crawl_pages(seed))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let failures = results.iter().filter(|result| result.is_err()).count();

    if json {
        let reports: Vec<SeedReport> = seeds
            .iter()
            .zip(&results)
            .map(|(seed, result)| SeedReport {
                seed,
                output: result.as_ref().ok(),
                error: result.as_ref().err().map(|e| e.to_string()),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (seed, result) in seeds.iter().zip(&results) {
            match result {
                Ok(output) => {
                    tracing::info!(seed = %seed, pages = output.pages.len(), "crawled");
                    println!("{}", output.render());
                }
                Err(e) => tracing::error!(seed = %seed, "{}", e),
            }
        }
    }

    Ok(if failures > 0 { 2 } else { 0 })
}

async fn handle_scrape(url: &str, timeout_secs: u64) -> Result<i32> {
    let options = CrawlOptions::default().with_timeout(Duration::from_secs(timeout_secs));
    let crawler = Crawler::new(options).context("Invalid scrape settings")?;

    let text = crawler
        .quick_scrape(url)
        .await
        .with_context(|| format!("Failed to scrape {}", url))?;

    println!("{}", text);
    Ok(0)
}
