//! Cache-then-revalidate cycle for one sheet.

use std::sync::Arc;

use getset::Getters;
use log::{debug, warn};

use crate::common::errors::{CallbackResult, SyncError};
use crate::domain::sheet::registry::SheetRegistry;
use crate::domain::sheet::RowCollection;
use crate::infrastructure::store::snapshot_store::{SnapshotMap, SnapshotStore};
use crate::infrastructure::store::working_set::WorkingSet;
use crate::infrastructure::web::client::SheetRetriever;
use crate::infrastructure::web::payload;

/// How one synchronization cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Revalidation produced rows that differ from the stored snapshot; the
    /// snapshot was overwritten.
    Updated,
    /// Revalidation matched the stored snapshot.
    Unchanged,
    /// Retrieval or decoding failed this cycle; whatever was cached stays
    /// visible.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct SyncReport {
    sheet_id: String,
    cache_hit: bool,
    outcome: SyncOutcome,
}

/// Runs the cache-then-revalidate cycle for single sheets.
///
/// The registry, snapshot store, working set, and retriever are shared
/// handles: any number of synchronizers and coordinators can operate on the
/// same state.
#[derive(Clone)]
pub struct SheetSynchronizer {
    registry: Arc<SheetRegistry>,
    store: Arc<dyn SnapshotStore>,
    working_set: Arc<WorkingSet>,
    retriever: Arc<dyn SheetRetriever>,
}

impl SheetSynchronizer {
    pub fn new(
        registry: Arc<SheetRegistry>,
        store: Arc<dyn SnapshotStore>,
        working_set: Arc<WorkingSet>,
        retriever: Arc<dyn SheetRetriever>,
    ) -> Self {
        Self {
            registry,
            store,
            working_set,
            retriever,
        }
    }

    /// Serve the cached snapshot for `sheet_id` (if any), revalidate against
    /// the remote source, and persist the result when it differs.
    ///
    /// `on_observed` fires when data becomes visible in the working set: at
    /// most once for the cached copy and at most once more when revalidation
    /// changed it. An error from the cache-path invocation is swallowed (the
    /// cached copy may not satisfy the caller's shape expectations); errors
    /// from the revalidation-path invocation and from `on_settled` propagate.
    /// `on_settled` fires exactly once, after revalidation has run its course,
    /// whether or not it produced data.
    pub async fn synchronize(
        &self,
        sheet_id: &str,
        mut on_observed: impl FnMut() -> CallbackResult + Send,
        mut on_settled: impl FnMut() -> CallbackResult + Send,
    ) -> Result<SyncReport, SyncError> {
        let cached = self.read_snapshot(sheet_id);
        let cache_hit = cached.is_some();
        if let Some(rows) = cached {
            self.working_set.insert(sheet_id, rows);
            if let Err(e) = on_observed() {
                warn!(
                    "sheet {}: cached-data observer rejected, continuing: {}",
                    sheet_id, e
                );
            }
        }

        let outcome = match self.revalidate(sheet_id).await {
            Some(true) => {
                on_observed().map_err(SyncError::Callback)?;
                SyncOutcome::Updated
            }
            Some(false) => SyncOutcome::Unchanged,
            None => SyncOutcome::Unavailable,
        };

        on_settled().map_err(SyncError::Callback)?;
        debug!("sheet {} settled: {:?}", sheet_id, outcome);
        Ok(SyncReport {
            sheet_id: sheet_id.to_string(),
            cache_hit,
            outcome,
        })
    }

    fn read_snapshot(&self, sheet_id: &str) -> Option<RowCollection> {
        let mut snapshots = match self.store.read_all() {
            Ok(snapshots) => snapshots,
            Err(e) => {
                warn!("snapshot read failed, serving nothing from cache: {}", e);
                return None;
            }
        };
        snapshots.remove(sheet_id)
    }

    /// Fetch, decode, and reconcile with the persisted snapshot.
    ///
    /// `Some(true)` when the fresh rows differ from the snapshot (which was
    /// overwritten), `Some(false)` when they match, `None` when the source
    /// produced no usable data this cycle. A failed retrieval is given up on
    /// immediately rather than retried, so the cycle always settles.
    async fn revalidate(&self, sheet_id: &str) -> Option<bool> {
        let Some(locator) = self.registry.locator(sheet_id) else {
            warn!("sheet {} is not configured, skipping revalidation", sheet_id);
            return None;
        };
        let raw = match self.retriever.retrieve(&locator).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("sheet {}: retrieval failed: {}", sheet_id, e);
                return None;
            }
        };
        let rows = match payload::parse_rows(&raw) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("sheet {}: undecodable payload: {}", sheet_id, e);
                return None;
            }
        };

        self.working_set.insert(sheet_id, rows.clone());

        // Re-read rather than reuse the earlier snapshot: another cycle may
        // have written in the meantime. Overlapping cycles still race on the
        // write below and the last writer wins.
        let mut snapshots = match self.store.read_all() {
            Ok(snapshots) => snapshots,
            Err(e) => {
                warn!("snapshot read failed before compare: {}", e);
                SnapshotMap::new()
            }
        };
        if snapshots.get(sheet_id) == Some(&rows) {
            return Some(false);
        }
        snapshots.insert(sheet_id.to_string(), rows);
        if let Err(e) = self.store.write_all(&snapshots) {
            warn!("sheet {}: persisting snapshot failed: {}", sheet_id, e);
        }
        Some(true)
    }
}
