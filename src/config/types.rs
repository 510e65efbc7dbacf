use serde::Deserialize;

/// Top-level configuration for a crawl run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub target: TargetConfig,
}

/// Crawler behavior knobs, mapped directly to the defaults in the spec.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Visit cap; the orchestrator stops admitting new visits once reached.
    #[serde(rename = "max-pages")]
    pub max_pages: u64,

    /// Worker pool size.
    #[serde(rename = "num-threads")]
    pub num_threads: usize,

    /// Number of seed lines to sample from the seed file.
    #[serde(rename = "num-seeds")]
    pub num_seeds: usize,

    /// Minimum seconds between successful fetches against the same host.
    #[serde(rename = "min-interval-secs", default = "default_min_interval_secs")]
    pub min_interval_secs: f64,

    /// Ceiling on cumulative wait for a rate-limit gate.
    #[serde(rename = "max-wait-secs", default = "default_max_wait_secs")]
    pub max_wait_secs: f64,

    /// Page fetch connect timeout.
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Page fetch read timeout.
    #[serde(rename = "read-timeout-secs", default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// robots.txt fetch connect timeout.
    #[serde(
        rename = "robots-connect-timeout-secs",
        default = "default_robots_connect_timeout_secs"
    )]
    pub robots_connect_timeout_secs: u64,

    /// robots.txt fetch read timeout.
    #[serde(
        rename = "robots-read-timeout-secs",
        default = "default_robots_read_timeout_secs"
    )]
    pub robots_read_timeout_secs: u64,

    /// Internal budget for HTML link extraction.
    #[serde(rename = "parse-budget-secs", default = "default_parse_budget_secs")]
    pub parse_budget_secs: u64,

    /// How long a worker blocks on an empty frontier before counting a retry.
    #[serde(
        rename = "frontier-pop-timeout-secs",
        default = "default_frontier_pop_timeout_secs"
    )]
    pub frontier_pop_timeout_secs: u64,

    /// Consecutive empty pops a worker tolerates before exiting.
    #[serde(rename = "retry-budget", default = "default_retry_budget")]
    pub retry_budget: u32,

    /// Sleep between consecutive empty pops.
    #[serde(rename = "retry-sleep-secs", default = "default_retry_sleep_secs")]
    pub retry_sleep_secs: u64,
}

fn default_min_interval_secs() -> f64 {
    2.0
}
fn default_max_wait_secs() -> f64 {
    20.0
}
fn default_connect_timeout_secs() -> u64 {
    3
}
fn default_read_timeout_secs() -> u64 {
    8
}
fn default_robots_connect_timeout_secs() -> u64 {
    3
}
fn default_robots_read_timeout_secs() -> u64 {
    5
}
fn default_parse_budget_secs() -> u64 {
    8
}
fn default_frontier_pop_timeout_secs() -> u64 {
    3
}
fn default_retry_budget() -> u32 {
    5
}
fn default_retry_sleep_secs() -> u64 {
    2
}

/// A single browser-like User-Agent string, presented to every host.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    pub string: String,
}

/// Input/output file locations.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(rename = "seed-file")]
    pub seed_file: String,

    #[serde(rename = "log-dir")]
    pub log_dir: String,
}

/// The top-level domain this crawl is restricted to.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    #[serde(rename = "tld-suffix", default = "default_tld_suffix")]
    pub tld_suffix: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            tld_suffix: default_tld_suffix(),
        }
    }
}

fn default_tld_suffix() -> String {
    ".nz".to_string()
}
