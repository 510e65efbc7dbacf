//! Host stats: the shared structure behind both C3 (Host Rate Limiter) and
//! half of C6 (Scoring Engine's domain/in-degree inputs). Grounded in the
//! teacher's `crawler::scheduler::DomainState`, which combined per-domain
//! rate-limit bookkeeping with request counters in a single guarded map.

use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Per-host counters and rate-limit bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostStats {
    pub enqueue_count: u64,
    pub in_degree: u64,
    pub last_access_time: Option<Instant>,
}

/// Thread-safe registry of [`HostStats`], one lock shared by every host.
///
/// Acquiring the rate-limit gate and reading/updating `last_access_time`
/// happen under the same lock acquisition, so two workers can never be
/// granted overlapping slots on the same host.
pub struct HostStatsRegistry {
    inner: Mutex<HashMap<String, HostStats>>,
}

impl HostStatsRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Records an enqueue against `host`, returning the stats snapshot after
    /// the increment (used immediately by the scoring engine).
    pub async fn record_enqueue(&self, host: &str) -> HostStats {
        let mut guard = self.inner.lock().await;
        let entry = guard.entry(host.to_string()).or_default();
        entry.enqueue_count += 1;
        *entry
    }

    /// Records a cross-host incoming link into `host`.
    pub async fn bump_in_degree(&self, host: &str) -> HostStats {
        let mut guard = self.inner.lock().await;
        let entry = guard.entry(host.to_string()).or_default();
        entry.in_degree += 1;
        *entry
    }

    /// Reads the current stats for `host` without mutating them.
    pub async fn snapshot(&self, host: &str) -> HostStats {
        let guard = self.inner.lock().await;
        guard.get(host).copied().unwrap_or_default()
    }

    /// C3's `acquire`: blocks the caller until at least `min_interval` has
    /// elapsed since the last granted acquire for `host`, or until
    /// cumulative wait exceeds `max_wait`. Sleeps are jittered within the
    /// remaining window to avoid lockstep thundering herds across workers
    /// waiting on the same host.
    pub async fn acquire(&self, host: &str, min_interval: Duration, max_wait: Duration) -> bool {
        let deadline = Instant::now() + max_wait;

        loop {
            if Instant::now() >= deadline {
                return false;
            }

            let wait = {
                let mut guard = self.inner.lock().await;
                let entry = guard.entry(host.to_string()).or_default();
                match entry.last_access_time {
                    None => {
                        entry.last_access_time = Some(Instant::now());
                        return true;
                    }
                    Some(last) => {
                        let elapsed = last.elapsed();
                        if elapsed >= min_interval {
                            entry.last_access_time = Some(Instant::now());
                            return true;
                        }
                        min_interval - elapsed
                    }
                }
            };

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }

            tokio::time::sleep(jittered(wait.min(remaining))).await;
        }
    }
}

impl Default for HostStatsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Randomizes a sleep duration to somewhere in `[50%, 100%]` of the input,
/// so concurrently-waiting workers don't all wake and retry in lockstep.
fn jittered(upper: Duration) -> Duration {
    if upper.is_zero() {
        return upper;
    }
    let factor: f64 = rand::thread_rng().gen_range(0.5..=1.0);
    Duration::from_secs_f64(upper.as_secs_f64() * factor).max(Duration::from_millis(1))
}
