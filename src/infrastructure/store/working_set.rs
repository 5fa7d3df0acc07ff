//! In-memory rows currently visible to cell accessors.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::sheet::{Row, RowCollection, SheetId};

/// The process-local table of loaded rows per sheet.
///
/// May briefly run ahead of the snapshot store (freshly fetched, not yet
/// compared) or behind it during the compare step; the synchronizer's
/// compare-and-persist cycle reconciles the two. Owned by the facade and
/// shared by handle so independent caches never interfere.
#[derive(Debug, Default)]
pub struct WorkingSet {
    tables: RwLock<HashMap<SheetId, RowCollection>>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: &str, rows: RowCollection) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.insert(id.to_string(), rows);
    }

    pub fn rows(&self, id: &str) -> Option<RowCollection> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables.get(id).cloned()
    }

    pub fn row(&self, id: &str, record: usize) -> Option<Row> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables.get(id)?.get(record).cloned()
    }

    pub fn row_count(&self, id: &str) -> usize {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables.get(id).map(Vec::len).unwrap_or(0)
    }

    pub fn contains(&self, id: &str) -> bool {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables.contains_key(id)
    }

    /// Reset every listed sheet to an empty collection. Called on
    /// reconfiguration so stale rows from a previous metadata generation
    /// never leak through the accessors.
    pub fn reset<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<SheetId>,
    {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        for id in ids {
            tables.insert(id.into(), RowCollection::new());
        }
    }
}
