//! Remote persistence of the singleton analysis record.
//!
//! Failures never escape this module: saves report a [`SyncStatus`] and
//! loads degrade to `None`.

use crate::analysis::model::StrategicData;
use crate::error::StrataResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use strata_redis::queries::strategic_data as queries;
use strata_redis::RedisPool;
use tracing::{debug, error, info, warn};

/// A table-like store of JSON documents keyed by record id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace the document under `id`.
    async fn upsert(&self, id: i64, document: &str) -> StrataResult<()>;

    /// Fetch the document under `id`.
    async fn select(&self, id: i64) -> StrataResult<Option<String>>;
}

#[async_trait]
impl DocumentStore for RedisPool {
    async fn upsert(&self, id: i64, document: &str) -> StrataResult<()> {
        queries::upsert_strategic_data(self, id, document).await?;
        Ok(())
    }

    async fn select(&self, id: i64) -> StrataResult<Option<String>> {
        let row = queries::get_strategic_data(self, id).await?;
        Ok(row.map(|r| r.data))
    }
}

/// Process-local document store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    records: Arc<Mutex<HashMap<i64, String>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw document under `id`.
    pub fn get(&self, id: i64) -> Option<String> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Store a raw document, bypassing serialization.
    pub fn put_raw(&self, id: i64, document: impl Into<String>) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, document.into());
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn upsert(&self, id: i64, document: &str) -> StrataResult<()> {
        self.put_raw(id, document);
        Ok(())
    }

    async fn select(&self, id: i64) -> StrataResult<Option<String>> {
        Ok(self.get(id))
    }
}

/// Result of a remote save, suitable for showing to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Saved,
    Failed(String),
}

impl SyncStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Saves and loads the whole analysis as one record.
pub struct RemoteSync<S: DocumentStore> {
    store: S,
    record_id: i64,
}

impl<S: DocumentStore> RemoteSync<S> {
    pub fn new(store: S, record_id: i64) -> Self {
        Self { store, record_id }
    }

    pub fn record_id(&self) -> i64 {
        self.record_id
    }

    /// Upsert the full analysis under the fixed record id.
    pub async fn save(&self, data: &StrategicData) -> SyncStatus {
        let document = match serde_json::to_string(data) {
            Ok(document) => document,
            Err(e) => {
                error!(error = %e, "Failed to serialize analysis for remote save");
                return SyncStatus::Failed(e.to_string());
            }
        };

        match self.store.upsert(self.record_id, &document).await {
            Ok(()) => {
                info!(record_id = self.record_id, "Analysis saved to remote store");
                SyncStatus::Saved
            }
            Err(e) => {
                error!(record_id = self.record_id, error = %e, "Remote save failed");
                SyncStatus::Failed(e.to_string())
            }
        }
    }

    /// Fetch the analysis. Missing, unreadable and malformed records all
    /// come back as `None`.
    pub async fn load(&self) -> Option<StrategicData> {
        let document = match self.store.select(self.record_id).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                debug!(record_id = self.record_id, "No remote record");
                return None;
            }
            Err(e) => {
                error!(record_id = self.record_id, error = %e, "Remote load failed");
                return None;
            }
        };

        match StrategicData::from_json(&document) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(record_id = self.record_id, error = %e, "Ignoring malformed remote record");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::{FactorUpdate, MatrixKind};
    use crate::error::StrataError;

    struct UnreachableStore;

    #[async_trait]
    impl DocumentStore for UnreachableStore {
        async fn upsert(&self, _id: i64, _document: &str) -> StrataResult<()> {
            Err(StrataError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        }

        async fn select(&self, _id: i64) -> StrataResult<Option<String>> {
            Err(StrataError::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "timed out",
            )))
        }
    }

    fn sample() -> StrategicData {
        let mut data = StrategicData::seeded();
        let id = data.add_factor(MatrixKind::Ife).id.clone();
        data.update_factor(
            MatrixKind::Ife,
            &id,
            FactorUpdate {
                weight: Some(0.35),
                rating: Some(4.0),
                ..Default::default()
            },
        )
        .unwrap();
        data
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryDocumentStore::new();
        let sync = RemoteSync::new(store.clone(), 1);
        let data = sample();

        assert_eq!(sync.save(&data).await, SyncStatus::Saved);
        assert_eq!(sync.load().await, Some(data));
    }

    #[tokio::test]
    async fn test_save_overwrites_singleton() {
        let store = MemoryDocumentStore::new();
        let sync = RemoteSync::new(store.clone(), 1);

        sync.save(&sample()).await;
        let empty = StrategicData::default();
        sync.save(&empty).await;

        assert_eq!(sync.load().await, Some(empty));
        assert!(store.get(2).is_none());
    }

    #[tokio::test]
    async fn test_missing_record_is_none() {
        let sync = RemoteSync::new(MemoryDocumentStore::new(), 1);
        assert_eq!(sync.load().await, None);
    }

    #[tokio::test]
    async fn test_malformed_record_is_treated_as_absent() {
        let store = MemoryDocumentStore::new();
        store.put_raw(1, "[1, 2, 3]");
        let sync = RemoteSync::new(store, 1);
        assert_eq!(sync.load().await, None);
    }

    #[tokio::test]
    async fn test_store_failures_are_surfaced_not_raised() {
        let sync = RemoteSync::new(UnreachableStore, 1);
        let status = sync.save(&sample()).await;
        assert!(!status.is_success());
        assert!(matches!(status, SyncStatus::Failed(msg) if msg.contains("refused")));
        assert_eq!(sync.load().await, None);
    }
}
