//! Durable storage collaborator.
//!
//! Holds the single "last report" slot UI surfaces read across sessions.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::report::ScanReport;

/// Storage key holding the serialized last scan report.
pub const LAST_SCAN_RESULTS_KEY: &str = "lastScanResults";

#[derive(Debug, Error)]
#[error("storage error: {0}")]
pub struct StorageError(pub String);

/// Durable key-value storage for the last-report slot.
///
/// The slot is last-writer-wins: two surfaces scanning concurrently can
/// interleave writes and the later write silently replaces the earlier one.
/// There is no revision counter and no schema versioning; readers get
/// whatever was written last.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Read the last persisted report, if any.
    async fn load_last_report(&self) -> Result<Option<ScanReport>, StorageError>;

    /// Replace the last-report slot.
    async fn save_last_report(&self, report: &ScanReport) -> Result<(), StorageError>;
}

/// In-memory store for tests and embeddings without a real backend.
///
/// Keeps the slot as a JSON value, mirroring the serialize-on-write
/// semantics of the real key-value backend.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn load_last_report(&self) -> Result<Option<ScanReport>, StorageError> {
        let slot = self.slot.lock().await;
        match slot.as_ref() {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| StorageError(e.to_string())),
        }
    }

    async fn save_last_report(&self, report: &ScanReport) -> Result<(), StorageError> {
        let value = serde_json::to_value(report).map_err(|e| StorageError(e.to_string()))?;
        *self.slot.lock().await = Some(value);
        debug!(key = LAST_SCAN_RESULTS_KEY, "persisted last scan report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ScanReport;

    #[tokio::test]
    async fn empty_store_has_no_report() {
        let store = MemoryStore::new();
        assert!(store.load_last_report().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        let report = ScanReport::new("https://example.com", Vec::new(), Vec::new());
        store.save_last_report(&report).await.unwrap();

        let loaded = store.load_last_report().await.unwrap().unwrap();
        assert_eq!(loaded, report);
    }

    #[tokio::test]
    async fn second_write_wins() {
        let store = MemoryStore::new();
        let first = ScanReport::new("https://first.example", Vec::new(), Vec::new());
        let second = ScanReport::new("https://second.example", Vec::new(), Vec::new());

        store.save_last_report(&first).await.unwrap();
        store.save_last_report(&second).await.unwrap();

        let loaded = store.load_last_report().await.unwrap().unwrap();
        assert_eq!(loaded.url, "https://second.example");
    }
}
