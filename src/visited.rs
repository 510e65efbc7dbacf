//! Visited records: the append-only half of the visited table. Presence
//! (for the dedup test-and-insert) lives in [`crate::dedup::DedupRegistry`]
//! keyed by minimized URL; this store holds the full record the spec keys
//! by normalized URL, kept separately so recording a visit never races with
//! claiming one.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct VisitedRecord {
    pub url_normalized: String,
    pub size: u64,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub depth: u32,
    pub visit_order: u64,
    pub redirect_target: Option<String>,
    pub is_seed: bool,
    pub worker_id: usize,
}

pub struct VisitedStore {
    records: Mutex<Vec<VisitedRecord>>,
}

impl VisitedStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub async fn record(&self, record: VisitedRecord) {
        self.records.lock().await.push(record);
    }

    pub async fn snapshot(&self) -> Vec<VisitedRecord> {
        self.records.lock().await.clone()
    }
}

impl Default for VisitedStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_accumulate_in_order() {
        let store = VisitedStore::new();
        store
            .record(VisitedRecord {
                url_normalized: "https://a.nz/".to_string(),
                size: 100,
                timestamp: Utc::now(),
                status: "200".to_string(),
                depth: 0,
                visit_order: 1,
                redirect_target: None,
                is_seed: true,
                worker_id: 0,
            })
            .await;
        store
            .record(VisitedRecord {
                url_normalized: "https://b.nz/".to_string(),
                size: 0,
                timestamp: Utc::now(),
                status: "Timeout".to_string(),
                depth: 1,
                visit_order: 2,
                redirect_target: None,
                is_seed: false,
                worker_id: 1,
            })
            .await;

        let records = store.snapshot().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].visit_order, 1);
        assert_eq!(records[1].status, "Timeout");
    }
}
