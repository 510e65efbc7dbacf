//! Priority frontier: C4. A thread-safe min-priority queue keyed by
//! `(final_priority, sequence)`, with blocking `pop` under a timeout.
//! Grounded in the teacher's `crawler::scheduler::QueuedUrl`/`BinaryHeap`
//! idiom (reversed `Ord` so a max-heap behaves as a min-heap), combined with
//! a `tokio::sync::Notify` to let `pop` block without spinning.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::Duration;
use tokio::sync::{Mutex, Notify};

/// A single pending URL along with the scoring inputs that produced its
/// priority, carried through so the orchestrator can log them later without
/// recomputing.
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub final_priority: u32,
    pub sequence: u64,
    pub url_normalized: String,
    pub depth: u32,
    pub domain_priority: u32,
    pub in_degree_priority: u32,
    pub second_label_priority: u32,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so lower (priority, sequence)
        // surfaces first.
        other
            .final_priority
            .cmp(&self.final_priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.final_priority == other.final_priority && self.sequence == other.sequence
    }
}

impl Eq for FrontierEntry {}

/// Thread-safe priority frontier with a monotone sequence counter for stable
/// FIFO tie-breaking.
pub struct Frontier {
    heap: Mutex<BinaryHeap<FrontierEntry>>,
    sequence: AtomicU64,
    notify: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            heap: Mutex::new(BinaryHeap::new()),
            sequence: AtomicU64::new(0),
            notify: Notify::new(),
        }
    }

    /// Allocates the next strictly-increasing sequence number. Callers use
    /// this to stamp an entry before `push`, so push-order ties break in
    /// FIFO order regardless of when the heap lock is actually acquired.
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, AtomicOrdering::SeqCst)
    }

    pub async fn push(&self, entry: FrontierEntry) {
        {
            let mut heap = self.heap.lock().await;
            heap.push(entry);
        }
        self.notify.notify_one();
    }

    /// Blocks up to `timeout` waiting for an entry. An empty return is a
    /// signal that the frontier was drained during the wait, not an error.
    pub async fn pop(&self, timeout: Duration) -> Option<FrontierEntry> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            {
                let mut heap = self.heap.lock().await;
                if let Some(entry) = heap.pop() {
                    return Some(entry);
                }
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            tokio::select! {
                _ = self.notify.notified() => {}
                _ = tokio::time::sleep(remaining) => return None,
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.heap.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}
