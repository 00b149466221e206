//! Working session: the in-memory analysis plus its persistence adapters.
//!
//! Every mutation is written to the local store and queued for auto-save to
//! the active file.

use crate::analysis::model::StrategicData;
use crate::error::StrataResult;
use crate::exchange::{ExportOutcome, FileExchange, LocalFile};
use crate::persistence::local::{load_local, save_local};
use crate::persistence::remote::{DocumentStore, RemoteSync, SyncStatus};
use crate::scoring::AnalysisSummary;
use std::path::PathBuf;
use std::sync::Arc;
use strata_db::queries::kv;
use strata_db::DbPool;
use tracing::{debug, info, warn};

/// Local key remembering the last exported/imported file path.
pub const ACTIVE_FILE_KEY: &str = "activeFile";

pub struct Session {
    data: StrategicData,
    pool: DbPool,
    exchange: FileExchange,
}

impl Session {
    /// Start from the seeded analysis, overlaid with whatever the local
    /// store holds, and restore the remembered active file.
    pub fn open(pool: DbPool, exchange: FileExchange) -> Self {
        let mut data = StrategicData::seeded();
        load_local(&pool).merge_into(&mut data);

        match kv::get_value(&pool, ACTIVE_FILE_KEY) {
            Ok(Some(path)) if !path.is_empty() => {
                debug!(path = %path, "Restoring active file");
                exchange.set_active_file(Arc::new(LocalFile::new(PathBuf::from(path))));
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Could not read remembered active file"),
        }

        Self {
            data,
            pool,
            exchange,
        }
    }

    pub fn data(&self) -> &StrategicData {
        &self.data
    }

    pub fn exchange(&self) -> &FileExchange {
        &self.exchange
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary::compute(&self.data)
    }

    /// Apply `f` to the analysis and persist the result.
    ///
    /// When `f` fails the analysis is rolled back to its state before the
    /// call and nothing is persisted.
    pub fn mutate<T, F>(&mut self, f: F) -> StrataResult<T>
    where
        F: FnOnce(&mut StrategicData) -> StrataResult<T>,
    {
        let before = self.data.clone();
        match f(&mut self.data) {
            Ok(out) => {
                self.persist();
                Ok(out)
            }
            Err(e) => {
                self.data = before;
                Err(e)
            }
        }
    }

    /// Replace the whole analysis and persist it.
    pub fn replace(&mut self, data: StrategicData) {
        self.data.replace(data);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = save_local(&self.pool, &self.data) {
            warn!(error = %e, "Failed to persist analysis locally");
        }
        self.exchange.auto_save(&self.data);
    }

    fn remember_active_file(&self) {
        let Some(handle) = self.exchange.active_file() else {
            return;
        };
        let Some(path) = handle.path() else {
            return;
        };
        if let Err(e) = kv::set_value(&self.pool, ACTIVE_FILE_KEY, &path.to_string_lossy()) {
            warn!(error = %e, "Could not remember active file");
        }
    }

    /// Export to the active file (or a newly picked one).
    pub async fn export(&self) -> ExportOutcome {
        let outcome = self.exchange.export_to_file(&self.data).await;
        if outcome.success {
            self.remember_active_file();
        }
        outcome
    }

    /// Import from a picked file, replacing the analysis. Returns whether
    /// anything was loaded.
    pub async fn import(&mut self) -> bool {
        match self.exchange.import_from_file().await.data {
            Some(data) => {
                self.replace(data);
                self.remember_active_file();
                true
            }
            None => false,
        }
    }

    /// Upsert the analysis to the remote store.
    pub async fn push<S: DocumentStore>(&self, remote: &RemoteSync<S>) -> SyncStatus {
        remote.save(&self.data).await
    }

    /// Replace the analysis with the remote record. Returns whether one was found.
    pub async fn pull<S: DocumentStore>(&mut self, remote: &RemoteSync<S>) -> bool {
        match remote.load().await {
            Some(data) => {
                info!(record_id = remote.record_id(), "Analysis pulled from remote store");
                self.replace(data);
                true
            }
            None => false,
        }
    }

    /// Write any pending auto-save before the session ends. Returns whether
    /// a snapshot was written.
    pub async fn close(self) -> bool {
        self.exchange.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::{FactorUpdate, MatrixKind, SwotBucket};
    use crate::error::StrataError;
    use crate::exchange::{NoPicker, PathPicker};
    use crate::persistence::remote::MemoryDocumentStore;
    use strata_db::init_memory_pool;

    fn session(pool: &DbPool) -> Session {
        Session::open(pool.clone(), FileExchange::new(Arc::new(NoPicker)))
    }

    #[test]
    fn test_fresh_session_has_seed_competitors() {
        let pool = init_memory_pool().unwrap();
        let s = session(&pool);
        assert_eq!(s.data().competitors.len(), 3);
        assert!(s.data().matrices.ife.is_empty());
    }

    #[test]
    fn test_mutations_persist_locally() {
        let pool = init_memory_pool().unwrap();
        let mut s = session(&pool);
        let id = s
            .mutate(|d| Ok(d.add_swot_item(SwotBucket::Opportunities).id.clone()))
            .unwrap();
        s.mutate(|d| d.update_swot_item(SwotBucket::Opportunities, &id, "Export markets").map(|_| ()))
            .unwrap();

        let reopened = session(&pool);
        assert_eq!(reopened.data().swot.opportunities[0].description, "Export markets");
        assert_eq!(reopened.data().competitors, s.data().competitors);
    }

    #[test]
    fn test_failed_mutation_is_not_applied() {
        let pool = init_memory_pool().unwrap();
        let mut s = session(&pool);
        assert!(s.mutate(|d| d.remove_factor(MatrixKind::Efe, "nope")).is_err());
        assert_eq!(kv::list_values(&pool).unwrap().len(), 0);
    }

    #[test]
    fn test_unsaved_seed_ids_are_stable_across_sessions() {
        let pool = init_memory_pool().unwrap();
        let ids = |s: Session| -> Vec<String> {
            s.data().competitors.iter().map(|c| c.id.clone()).collect()
        };
        let first = ids(session(&pool));
        let second = ids(session(&pool));
        assert_eq!(first, vec!["1", "2", "3"]);
        assert_eq!(first, second);
        assert_eq!(kv::list_values(&pool).unwrap().len(), 0);
    }

    #[test]
    fn test_partly_applied_mutation_is_rolled_back() {
        let pool = init_memory_pool().unwrap();
        let mut s = session(&pool);
        let before = s.data().clone();

        let result = s.mutate(|d| {
            let id = d.add_factor(MatrixKind::Ife).id.clone();
            d.update_factor(
                MatrixKind::Ife,
                &id,
                FactorUpdate {
                    weight: Some(f64::NAN),
                    ..Default::default()
                },
            )
            .map(|_| ())
        });
        assert!(matches!(result, Err(StrataError::ValidationError(_))));
        assert_eq!(s.data(), &before);

        s.mutate(|d| Ok(d.add_swot_item(SwotBucket::Threats).id.clone())).unwrap();
        let reopened = session(&pool);
        assert!(reopened.data().matrices.ife.is_empty());
        assert_eq!(reopened.data().swot.threats.len(), 1);
    }

    #[tokio::test]
    async fn test_push_and_pull() {
        let pool = init_memory_pool().unwrap();
        let mut s = session(&pool);
        s.mutate(|d| Ok(d.add_factor(MatrixKind::Ife).id.clone())).unwrap();

        let remote = RemoteSync::new(MemoryDocumentStore::new(), 1);
        assert!(s.push(&remote).await.is_success());
        let pushed = s.data().clone();

        s.replace(StrategicData::default());
        assert!(s.pull(&remote).await);
        assert_eq!(s.data(), &pushed);

        let empty_remote = RemoteSync::new(MemoryDocumentStore::new(), 1);
        assert!(!s.pull(&empty_remote).await);
        assert_eq!(s.data(), &pushed);
    }

    #[tokio::test]
    async fn test_export_is_remembered_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        let pool = init_memory_pool().unwrap();

        let s = Session::open(pool.clone(), FileExchange::new(Arc::new(PathPicker::new(&path))));
        assert!(s.export().await.success);
        assert!(!s.close().await);

        let mut reopened = session(&pool);
        assert!(reopened.exchange().has_active_file());
        reopened
            .mutate(|d| Ok(d.add_competitor("Newcomer").id.clone()))
            .unwrap();
        assert!(reopened.exchange().has_pending_save());
        assert!(reopened.close().await);

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let written = StrategicData::from_json(&contents).unwrap();
        assert_eq!(written.competitors.len(), 4);
    }
}
