//! Crawl orchestrator: C9. Spawns N `tokio::spawn` worker tasks sharing one
//! frontier, dedup registry, and set of stats registries, driving the
//! dequeue → gate → fetch → record → extract → enqueue loop. Replaces the
//! teacher's `Coordinator`/`run_crawl` placeholder, keeping its "build the
//! shared state, hand it to workers, join them" shape but built out fully
//! against this crawler's own worker loop rather than SQLite-backed resume.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url};
use crate::crawler::parser::extract_links_with_budget;
use crate::dedup::DedupRegistry;
use crate::frontier::{Frontier, FrontierEntry};
use crate::host_stats::HostStatsRegistry;
use crate::robots::HostPolicyCache;
use crate::scoring;
use crate::second_label_stats::SecondLabelStatsRegistry;
use crate::url::{extract_domain, is_valid, minimize, normalize, second_label};
use crate::visited::{VisitedRecord, VisitedStore};
use crate::CrawlerError;
use chrono::Utc;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use ::url::Url;

/// Shared state handed to every worker. Each field is its own lock (or
/// lock-free atomic), following the spec's "hold at most one lock at a
/// time" discipline.
pub struct CrawlState {
    config: Config,
    frontier: Frontier,
    dedup: DedupRegistry,
    host_stats: HostStatsRegistry,
    second_label_stats: SecondLabelStatsRegistry,
    robots: HostPolicyCache,
    visited: VisitedStore,
    http_client: Client,
    visit_counter: AtomicU64,
}

/// Outcome of a full crawl run, handed back for reporting.
pub struct CrawlOutcome {
    pub records: Vec<VisitedRecord>,
    pub elapsed: Duration,
    pub final_frontier_size: usize,
    pub final_distinct_host_count: usize,
}

impl CrawlState {
    fn new(config: Config, http_client: Client, robots: HostPolicyCache) -> Self {
        Self {
            config,
            frontier: Frontier::new(),
            dedup: DedupRegistry::new(),
            host_stats: HostStatsRegistry::new(),
            second_label_stats: SecondLabelStatsRegistry::new(),
            robots,
            visited: VisitedStore::new(),
            http_client,
            visit_counter: AtomicU64::new(0),
        }
    }

    fn tld_suffix(&self) -> &str {
        &self.config.target.tld_suffix
    }
}

/// Runs the full crawl: loads seeds, scores and pushes them, spawns the
/// worker pool, joins it, and returns the accumulated records for the
/// logger to report.
pub async fn run_crawl(config: Config, seeds: Vec<String>) -> Result<CrawlOutcome, CrawlerError> {
    let user_agent = config.user_agent.string.clone();
    let connect_timeout = Duration::from_secs(config.crawler.connect_timeout_secs);
    let read_timeout = Duration::from_secs(config.crawler.read_timeout_secs);
    let robots_connect_timeout = Duration::from_secs(config.crawler.robots_connect_timeout_secs);
    let robots_read_timeout = Duration::from_secs(config.crawler.robots_read_timeout_secs);

    let http_client = build_http_client(&user_agent, connect_timeout, read_timeout)
        .map_err(CrawlerError::Http)?;
    let robots = HostPolicyCache::new(&user_agent, robots_connect_timeout, robots_read_timeout)
        .map_err(CrawlerError::Http)?;

    let num_threads = config.crawler.num_threads;
    let state = Arc::new(CrawlState::new(config, http_client, robots));

    seed_frontier(&state, &seeds).await;

    let start = Instant::now();
    let mut handles = Vec::with_capacity(num_threads);
    for worker_id in 0..num_threads {
        let state = Arc::clone(&state);
        handles.push(tokio::spawn(worker_loop(state, worker_id)));
    }

    for handle in handles {
        handle.await.map_err(|e| CrawlerError::Worker(e.to_string()))?;
    }

    let elapsed = start.elapsed();
    let records = state.visited.snapshot().await;
    let final_frontier_size = state.frontier.len().await;
    let final_distinct_host_count = distinct_host_count(&records);

    Ok(CrawlOutcome {
        records,
        elapsed,
        final_frontier_size,
        final_distinct_host_count,
    })
}

fn distinct_host_count(records: &[VisitedRecord]) -> usize {
    records
        .iter()
        .filter_map(|r| Url::parse(&r.url_normalized).ok())
        .filter_map(|u| u.host_str().map(str::to_lowercase))
        .collect::<HashSet<_>>()
        .len()
}

async fn seed_frontier(state: &Arc<CrawlState>, seeds: &[String]) {
    for raw in seeds {
        let normalized = normalize(raw);
        let minimized = minimize(&normalized);

        let Ok(parsed) = Url::parse(&normalized) else {
            warn!(url = raw, "seed URL failed to parse, skipping");
            continue;
        };
        if !is_valid(&parsed, state.tld_suffix()) {
            warn!(url = %normalized, "seed URL fails validity filter, skipping");
            continue;
        }

        if !state.dedup.try_mark_enqueued(&minimized).await {
            continue;
        }

        push_scored(state, &parsed, normalized, 0, false).await;
    }
}

/// Scores `url` against its host's current stats and pushes it to the
/// frontier, then bumps the stats this edge contributes. Does not touch the
/// dedup registry; callers must have already claimed the enqueue.
///
/// Priority is computed from the stats as they stood *before* this edge is
/// counted, then the counts are bumped afterward. A host's first-ever
/// enqueue lands in the `0 -> 1` domain-priority bucket this way, not the
/// bucket for a count that already includes itself.
async fn push_scored(
    state: &Arc<CrawlState>,
    url: &Url,
    url_normalized: String,
    depth: u32,
    bump_in_degree: bool,
) {
    let Some(host) = extract_domain(url) else {
        return;
    };

    let pre_bump = state.host_stats.snapshot(&host).await;
    let label = second_label(&host, state.tld_suffix());
    let label_visit_count = match &label {
        Some(l) => state.second_label_stats.snapshot(l).await,
        None => 0,
    };

    let domain_p = scoring::domain_priority(pre_bump.enqueue_count);
    let in_degree_p = scoring::in_degree_priority(pre_bump.in_degree);
    let second_label_p = match &label {
        Some(l) => scoring::second_label_priority(l, label_visit_count),
        None => scoring::second_label_priority("", 0),
    };
    let final_priority = scoring::final_priority(domain_p, in_degree_p, second_label_p);
    let sequence = state.frontier.next_sequence();

    state
        .frontier
        .push(FrontierEntry {
            final_priority,
            sequence,
            url_normalized,
            depth,
            domain_priority: domain_p,
            in_degree_priority: in_degree_p,
            second_label_priority: second_label_p,
        })
        .await;

    state.host_stats.record_enqueue(&host).await;
    if bump_in_degree {
        state.host_stats.bump_in_degree(&host).await;
    }
}

async fn worker_loop(state: Arc<CrawlState>, worker_id: usize) {
    let pop_timeout = Duration::from_secs(state.config.crawler.frontier_pop_timeout_secs);
    let retry_budget = state.config.crawler.retry_budget;
    let retry_sleep = Duration::from_secs(state.config.crawler.retry_sleep_secs);
    let max_pages = state.config.crawler.max_pages;
    let min_interval = Duration::from_secs_f64(state.config.crawler.min_interval_secs);
    let max_wait = Duration::from_secs_f64(state.config.crawler.max_wait_secs);
    let parse_budget = Duration::from_secs(state.config.crawler.parse_budget_secs);
    let user_agent = state.config.user_agent.string.clone();

    let mut consecutive_empties: u32 = 0;

    loop {
        if state.visit_counter.load(Ordering::SeqCst) >= max_pages {
            break;
        }

        let Some(entry) = state.frontier.pop(pop_timeout).await else {
            consecutive_empties += 1;
            if consecutive_empties >= retry_budget {
                break;
            }
            tokio::time::sleep(retry_sleep).await;
            continue;
        };
        consecutive_empties = 0;

        // Claim a slot against the cap atomically, before committing to this
        // URL. The top-of-loop load is racy under num_threads > 1: every
        // worker can observe the same under-cap value and all proceed.
        // fetch_add hands out a unique index per worker, so checking that
        // index against max_pages is what actually bounds concurrent
        // commits.
        let claimed_idx = state.visit_counter.fetch_add(1, Ordering::SeqCst);
        if claimed_idx >= max_pages {
            break;
        }

        let Ok(parsed) = Url::parse(&entry.url_normalized) else {
            continue;
        };
        let minimized = minimize(&entry.url_normalized);
        let Some(parent_host) = extract_domain(&parsed) else {
            continue;
        };

        if !state.dedup.try_mark_visit(&minimized).await {
            continue;
        }

        let visit_order = claimed_idx + 1;

        if let Some(label) = second_label(&parent_host, state.tld_suffix()) {
            state.second_label_stats.record_visit(&label).await;
        }

        let granted = state
            .host_stats
            .acquire(&parent_host, min_interval, max_wait)
            .await;
        if !granted {
            debug!(host = parent_host, "rate-limit gate timed out, proceeding anyway");
        }

        if !state.robots.may_fetch(&parsed, &user_agent).await {
            state
                .visited
                .record(VisitedRecord {
                    url_normalized: entry.url_normalized.clone(),
                    size: 0,
                    timestamp: Utc::now(),
                    status: "Robots".to_string(),
                    depth: entry.depth,
                    visit_order,
                    redirect_target: None,
                    is_seed: entry.depth == 0,
                    worker_id,
                })
                .await;
            continue;
        }

        let outcome = fetch_url(&state.http_client, entry.url_normalized.as_str()).await;

        let redirect_target = outcome
            .final_url
            .as_ref()
            .map(|final_url| normalize(final_url))
            .filter(|normalized_final| normalized_final != &entry.url_normalized);

        state
            .visited
            .record(VisitedRecord {
                url_normalized: entry.url_normalized.clone(),
                size: outcome.size,
                timestamp: Utc::now(),
                status: outcome.status.clone(),
                depth: entry.depth,
                visit_order,
                redirect_target: redirect_target.clone(),
                is_seed: entry.depth == 0,
                worker_id,
            })
            .await;

        if let Some(ref redirect_target) = redirect_target {
            let redirect_min = minimize(redirect_target);
            state.dedup.try_mark_visit(&redirect_min).await;
            state.dedup.try_mark_enqueued(&redirect_min).await;
        }

        let Some(body) = outcome.body else {
            continue;
        };

        let links = extract_links_with_budget(&body, &parsed, parse_budget).await;
        let distinct_links: HashSet<String> = links.iter().map(|l| normalize(l)).collect();

        for link in distinct_links {
            let Ok(link_url) = Url::parse(&link) else {
                continue;
            };
            if !is_valid(&link_url, state.tld_suffix()) {
                continue;
            }

            let link_min = minimize(&link);
            if !state.dedup.try_mark_enqueued(&link_min).await {
                continue;
            }

            let bump_in_degree = extract_domain(&link_url)
                .map(|link_host| link_host != parent_host)
                .unwrap_or(false);

            push_scored(&state, &link_url, link, entry.depth + 1, bump_in_degree).await;
        }
    }

    info!(worker_id, "worker exiting");
}
