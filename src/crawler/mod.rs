//! Crawler module: the fetch/parse/orchestrate pipeline (C7, C8, C9).

mod fetcher;
mod orchestrator;
mod parser;

pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use orchestrator::{run_crawl, CrawlOutcome};
pub use parser::{extract_links_simple, extract_links_with_budget};
