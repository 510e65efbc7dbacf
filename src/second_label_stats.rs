//! Second-label stats: the visit-count half of C6's scoring inputs, keyed by
//! the DNS label immediately preceding the target TLD suffix (e.g. `govt` in
//! `agency.govt.nz`). Mirrors [`crate::host_stats::HostStatsRegistry`]'s
//! shape but keeps its own lock since the two are never updated together.

use std::collections::HashMap;
use tokio::sync::Mutex;

pub struct SecondLabelStatsRegistry {
    inner: Mutex<HashMap<String, u64>>,
}

impl SecondLabelStatsRegistry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Records a visit under `label`, returning the count after the increment.
    pub async fn record_visit(&self, label: &str) -> u64 {
        let mut guard = self.inner.lock().await;
        let count = guard.entry(label.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub async fn snapshot(&self, label: &str) -> u64 {
        let guard = self.inner.lock().await;
        guard.get(label).copied().unwrap_or(0)
    }
}

impl Default for SecondLabelStatsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
