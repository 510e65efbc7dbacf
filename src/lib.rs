//! tui-crawl: a polite, priority-driven, multithreaded breadth-first web
//! crawler restricted to a configured top-level domain.
//!
//! This crate implements the frontier, dedup registry, robots.txt cache,
//! rate limiter, scoring engine, fetcher, link extractor, and orchestrator
//! that together drive a single crawl run to completion.

pub mod config;
pub mod crawler;
pub mod dedup;
pub mod frontier;
pub mod host_stats;
pub mod output;
pub mod robots;
pub mod scoring;
pub mod second_label_stats;
pub mod seeds;
pub mod url;
pub mod visited;

use thiserror::Error;

/// Top-level error type for crawl-run operations.
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to load seed file: {0}")]
    Seeds(#[from] seeds::SeedLoadError),

    #[error("failed to write crawl log: {0}")]
    Log(#[from] output::LogWriteError),

    #[error("worker task panicked: {0}")]
    Worker(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// URL-specific errors, used where URL handling needs to report failure
/// rather than fall back to a pass-through value.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("failed to parse URL: {0}")]
    Parse(String),

    #[error("missing host in URL")]
    MissingHost,
}

/// Result type alias for crawl-run operations.
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
