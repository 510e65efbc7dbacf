//! Dedup registry: C5. Two independently-locked sets of minimized URLs.
//! Grounded in the teacher's `crawler::scheduler` visited-set idiom, split
//! here into the two sets the spec distinguishes (enqueued vs.
//! visited-or-redirected-to) so each can be extended without holding both
//! locks at once.

use std::collections::HashSet;
use tokio::sync::Mutex;

pub struct DedupRegistry {
    enqueued: Mutex<HashSet<String>>,
    visited_or_redirected: Mutex<HashSet<String>>,
}

impl DedupRegistry {
    pub fn new() -> Self {
        Self {
            enqueued: Mutex::new(HashSet::new()),
            visited_or_redirected: Mutex::new(HashSet::new()),
        }
    }

    /// Atomically adds `min_url` to the visited-or-redirected set iff absent.
    /// Returns whether this call is the one that owns the visit/redirect.
    pub async fn try_mark_visit(&self, min_url: &str) -> bool {
        let mut guard = self.visited_or_redirected.lock().await;
        guard.insert(min_url.to_string())
    }

    pub async fn is_enqueued(&self, min_url: &str) -> bool {
        let guard = self.enqueued.lock().await;
        guard.contains(min_url)
    }

    /// Atomically adds `min_url` to the enqueued set iff absent. Returns
    /// whether this call is the one that owns the enqueue.
    pub async fn try_mark_enqueued(&self, min_url: &str) -> bool {
        let mut guard = self.enqueued.lock().await;
        guard.insert(min_url.to_string())
    }

    pub async fn is_visited_or_redirected(&self, min_url: &str) -> bool {
        let guard = self.visited_or_redirected.lock().await;
        guard.contains(min_url)
    }
}

impl Default for DedupRegistry {
    fn default() -> Self {
        Self::new()
    }
}
