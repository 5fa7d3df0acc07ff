//! Cache-then-revalidate synchronization for remotely hosted sheets.
//!
//! Each configured sheet has a durable local snapshot and a network-authoritative
//! copy. A synchronization cycle serves the snapshot immediately, revalidates it
//! against the remote source in the background, and notifies observers exactly
//! when the visible data appears or changes, for a single sheet or for a batch
//! of sheets synchronized concurrently.

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;

pub use application::sheet_cache::SheetCache;
pub use common::errors::{CallbackResult, RetrieveError, SyncError};
pub use domain::sheet::descriptor::{SheetDescriptor, SheetId, SheetLocator};
pub use domain::sheet::registry::SheetRegistry;
pub use domain::sheet::rows::{Cell, Row, RowCollection};
pub use domain::synchronization::fetch_session::{BatchSignal, FetchSession};
pub use infrastructure::store::snapshot_store::{
    JsonFileStore, MemoryStore, SnapshotMap, SnapshotStore,
};
pub use infrastructure::store::working_set::WorkingSet;
pub use infrastructure::sync::coordinator::SyncCoordinator;
pub use infrastructure::sync::synchronizer::{SheetSynchronizer, SyncOutcome, SyncReport};
pub use infrastructure::web::client::{GvizClient, SheetRetriever};
