//! Application facade tying together the registry, the stores, and the
//! synchronization engine.

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;
use serde_json::Value;

use crate::common::errors::{CallbackResult, SyncError};
use crate::domain::sheet::descriptor::SheetDescriptor;
use crate::domain::sheet::registry::SheetRegistry;
use crate::domain::sheet::RowCollection;
use crate::infrastructure::store::snapshot_store::SnapshotStore;
use crate::infrastructure::store::working_set::WorkingSet;
use crate::infrastructure::sync::coordinator::SyncCoordinator;
use crate::infrastructure::sync::synchronizer::{SheetSynchronizer, SyncReport};
use crate::infrastructure::web::client::{GvizClient, SheetRetriever};

/// Soft-real-time cache over a set of remote sheets.
///
/// Serves possibly-stale snapshots immediately, revalidates against the
/// network in the background, and maintains the in-memory working set that
/// the cell accessors read.
pub struct SheetCache {
    registry: Arc<SheetRegistry>,
    working_set: Arc<WorkingSet>,
    store: Arc<dyn SnapshotStore>,
    synchronizer: SheetSynchronizer,
    coordinator: SyncCoordinator,
}

impl SheetCache {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self::with_retriever(store, Arc::new(GvizClient::new()))
    }

    /// Build a cache with a custom transport, e.g. scripted payloads in tests.
    pub fn with_retriever(
        store: Arc<dyn SnapshotStore>,
        retriever: Arc<dyn SheetRetriever>,
    ) -> Self {
        let registry = Arc::new(SheetRegistry::new());
        let working_set = Arc::new(WorkingSet::new());
        let synchronizer = SheetSynchronizer::new(
            Arc::clone(&registry),
            Arc::clone(&store),
            Arc::clone(&working_set),
            retriever,
        );
        let coordinator = SyncCoordinator::new(synchronizer.clone());
        Self {
            registry,
            working_set,
            store,
            synchronizer,
            coordinator,
        }
    }

    /// Replace all sheet metadata.
    ///
    /// Every configured sheet's working-set entry is reset to an empty
    /// collection so rows from a previous metadata generation never leak
    /// through the accessors, and the persisted snapshot blob is normalized
    /// (corrupt content is rewritten as an empty store) so later
    /// read-modify-write cycles start from valid content.
    pub fn configure(&self, documents: HashMap<String, String>, descriptors: Vec<SheetDescriptor>) {
        self.registry.replace(documents, descriptors);
        self.working_set.reset(self.registry.sheet_ids());
        match self.store.read_all() {
            Ok(snapshots) => {
                if let Err(e) = self.store.write_all(&snapshots) {
                    warn!("snapshot normalization write failed: {}", e);
                }
            }
            Err(e) => warn!("snapshot normalization read failed: {}", e),
        }
    }

    /// Synchronize one sheet. `on_changed` fires when data appears from the
    /// cache and again when revalidation changed it.
    pub async fn synchronize_one(
        &self,
        id: &str,
        on_changed: impl FnMut() -> CallbackResult + Send,
    ) -> Result<SyncReport, SyncError> {
        self.synchronizer.synchronize(id, on_changed, || Ok(())).await
    }

    /// Synchronize a batch of sheets concurrently. See
    /// [`SyncCoordinator::synchronize_all`] for the callback cardinality.
    pub async fn synchronize_all(
        &self,
        ids: &[String],
        on_batch_ready: impl FnMut() -> CallbackResult + Send,
    ) -> Result<Vec<SyncReport>, SyncError> {
        self.coordinator.synchronize_all(ids, on_batch_ready).await
    }

    pub fn registry(&self) -> &SheetRegistry {
        &self.registry
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    /// Rows currently visible for a sheet, if any were loaded.
    pub fn rows(&self, sheet: &str) -> Option<RowCollection> {
        self.working_set.rows(sheet)
    }

    pub fn row_count(&self, sheet: &str) -> usize {
        self.working_set.row_count(sheet)
    }

    /// Raw value of `field` in `record`. `None` when the row, the cell, or
    /// the value itself is missing or null.
    pub fn cell(&self, sheet: &str, record: usize, field: &str) -> Option<Value> {
        let index = self.registry.field_index(sheet, field)?;
        let cell = self.working_set.row(sheet, record)?.cells.get(index)?.clone()?;
        if cell.is_null() {
            None
        } else {
            Some(cell.value)
        }
    }

    /// Preformatted rendering of `field`, when the source supplied one.
    pub fn formatted_cell(&self, sheet: &str, record: usize, field: &str) -> Option<String> {
        let index = self.registry.field_index(sheet, field)?;
        self.working_set.row(sheet, record)?.cells.get(index)?.clone()?.formatted
    }

    /// True when any of `fields` is missing or null in the record.
    pub fn any_cell_null(&self, sheet: &str, record: usize, fields: &[&str]) -> bool {
        fields.iter().any(|f| self.cell(sheet, record, f).is_none())
    }

    /// True when at least one of `fields` holds a value in the record.
    pub fn any_cell_filled(&self, sheet: &str, record: usize, fields: &[&str]) -> bool {
        fields.iter().any(|f| self.cell(sheet, record, f).is_some())
    }
}
