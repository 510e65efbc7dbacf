//! tui-crawl entry point: CLI wiring over the library's crawl orchestrator.

use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tui_crawl::config::load_config;
use tui_crawl::crawler::run_crawl;
use tui_crawl::output::{log_file_path, write_report, CrawlReport};
use tui_crawl::seeds::load_seeds;

/// A polite, priority-driven, multithreaded breadth-first web crawler
/// restricted to a configured top-level domain.
#[derive(Parser, Debug)]
#[command(name = "tui-crawl")]
#[command(version)]
#[command(about = "A polite, priority-driven web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Override the configured visit cap
    #[arg(long)]
    max_pages: Option<u64>,

    /// Override the configured worker count
    #[arg(long)]
    num_threads: Option<usize>,

    /// Override the configured seed sample size
    #[arg(long)]
    num_seeds: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!(path = %cli.config.display(), "loading configuration");
    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(num_threads) = cli.num_threads {
        config.crawler.num_threads = num_threads;
    }
    if let Some(num_seeds) = cli.num_seeds {
        config.crawler.num_seeds = num_seeds;
    }

    if cli.dry_run {
        print_dry_run(&config);
        return ExitCode::SUCCESS;
    }

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "crawl failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &tui_crawl::Config) -> anyhow::Result<()> {
    let seeds = load_seeds(
        std::path::Path::new(&config.output.seed_file),
        config.crawler.num_seeds,
    )?;
    tracing::info!(count = seeds.len(), "loaded seeds");

    let outcome = run_crawl(config.clone(), seeds).await?;
    tracing::info!(
        pages = outcome.records.len(),
        elapsed_secs = outcome.elapsed.as_secs_f64(),
        "crawl finished"
    );

    let report = CrawlReport {
        records: &outcome.records,
        elapsed_secs: outcome.elapsed.as_secs_f64(),
        final_frontier_size: outcome.final_frontier_size,
        final_distinct_host_count: outcome.final_distinct_host_count,
        num_workers: config.crawler.num_threads,
    };
    let path = log_file_path(&config.output.log_dir, Utc::now());
    if let Err(e) = write_report(&path, &report) {
        println!("warning: failed to write crawl log: {e}");
    } else {
        println!("crawl log written to {}", path.display());
    }

    Ok(())
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tui_crawl=info,warn"),
            1 => EnvFilter::new("tui_crawl=debug,info"),
            2 => EnvFilter::new("tui_crawl=trace,debug"),
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

fn print_dry_run(config: &tui_crawl::Config) {
    println!("=== tui-crawl dry run ===\n");
    println!("Crawler configuration:");
    println!("  max pages:    {}", config.crawler.max_pages);
    println!("  num threads:  {}", config.crawler.num_threads);
    println!("  num seeds:    {}", config.crawler.num_seeds);
    println!("  min interval: {}s", config.crawler.min_interval_secs);
    println!("  max wait:     {}s", config.crawler.max_wait_secs);
    println!("  target TLD:   {}", config.target.tld_suffix);
    println!("\nUser agent: {}", config.user_agent.string);
    println!("\nSeed file: {}", config.output.seed_file);
    println!("Log dir:   {}", config.output.log_dir);
    println!("\nConfiguration is valid.");
}
