//! Shelfmap main entry point
//!
//! Command-line interface for crawling an e-commerce site and collecting
//! product-detail URLs.

use clap::Parser;
use shelfmap::config::{validate, CrawlConfig};
use shelfmap::crawler::run_crawl;
use shelfmap::patterns::{JsonPatternStore, PatternStore};
use shelfmap::url::{canonicalize, extract_domain};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shelfmap: product-URL discovery crawler
///
/// Crawls an e-commerce site breadth-first from the given URL, stays on
/// that site's domain, and appends every link matching the site's
/// product-URL pattern to the output file as `domain,url` lines. The
/// pattern must already exist in the pattern store (produced by a separate
/// discovery step).
#[derive(Parser, Debug)]
#[command(name = "shelfmap")]
#[command(version)]
#[command(about = "Crawl an e-commerce site for product URLs", long_about = None)]
struct Cli {
    /// The starting URL of the site to crawl (e.g. https://www.example.com)
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// Maximum number of pages to crawl
    #[arg(long, default_value_t = 100)]
    max_pages: u64,

    /// Maximum concurrent page fetches
    #[arg(long, default_value_t = 5)]
    max_concurrent: usize,

    /// Path to the JSON pattern store
    #[arg(long, value_name = "FILE", default_value = "patterns.json")]
    patterns_file: PathBuf,

    /// Output file for discovered product URLs (appended, one per line)
    #[arg(short, long, value_name = "FILE", default_value = "product_urls.txt")]
    output: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the configuration and show the crawl plan without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = CrawlConfig {
        start_url: cli.start_url,
        max_pages: cli.max_pages,
        max_concurrent: cli.max_concurrent,
        patterns_file: cli.patterns_file,
        output_path: cli.output,
    };

    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    tracing::info!(
        "Starting crawl (max_pages={}, max_concurrent={})",
        config.max_pages,
        config.max_concurrent
    );

    match run_crawl(&config).await {
        Ok(()) => {
            tracing::info!("Crawl finished, check {} for results", config.output_path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelfmap=info,warn"),
            1 => EnvFilter::new("shelfmap=debug,info"),
            2 => EnvFilter::new("shelfmap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: resolves the plan and prints it
///
/// Performs the same startup steps as a real crawl (seed canonicalization,
/// pattern lookup) so a missing pattern fails here rather than at crawl
/// time.
fn handle_dry_run(config: &CrawlConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Shelfmap Dry Run ===\n");

    let seed = canonicalize(&config.start_url, None)?;
    let domain = extract_domain(&seed).ok_or(shelfmap::UrlError::MissingHost)?;

    let store = JsonPatternStore::new(&config.patterns_file);
    let pattern = store.load(&domain)?;

    println!("Crawl plan:");
    println!("  Seed URL: {}", seed);
    println!("  Domain: {}", domain);
    println!("  Product pattern: {}", pattern);
    println!("  Max pages: {}", config.max_pages);
    println!("  Max concurrent fetches: {}", config.max_concurrent);

    println!("\nFiles:");
    println!("  Pattern store: {}", config.patterns_file.display());
    println!("  Output: {} (append)", config.output_path.display());

    println!("\n✓ Configuration is valid, pattern found");
    Ok(())
}
