//! Concurrent synchronization of many sheets with one aggregate callback.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::join_all;
use log::debug;

use crate::common::errors::{CallbackResult, SyncError};
use crate::domain::synchronization::fetch_session::FetchSession;

use super::synchronizer::{SheetSynchronizer, SyncReport};

/// Fans out one synchronization cycle per requested sheet and reduces their
/// observe and settle events into batch-level callback invocations through a
/// shared [`FetchSession`].
#[derive(Clone)]
pub struct SyncCoordinator {
    synchronizer: SheetSynchronizer,
}

impl SyncCoordinator {
    pub fn new(synchronizer: SheetSynchronizer) -> Self {
        Self { synchronizer }
    }

    /// Synchronize every sheet in `ids` concurrently.
    ///
    /// `on_batch_ready` fires once when every requested sheet has some value
    /// (cached or fresh), and once more after all have settled if revalidation
    /// changed any of them in between. An empty `ids` slice is a no-op and the
    /// callback never fires; callers must guard against that themselves.
    pub async fn synchronize_all(
        &self,
        ids: &[String],
        on_batch_ready: impl FnMut() -> CallbackResult + Send,
    ) -> Result<Vec<SyncReport>, SyncError> {
        if ids.is_empty() {
            debug!("empty batch requested, nothing to synchronize");
            return Ok(Vec::new());
        }

        let session = Arc::new(Mutex::new(FetchSession::new(ids.iter().cloned())));
        let notify = Arc::new(Mutex::new(on_batch_ready));

        let jobs = dedupe(ids).into_iter().map(|id| {
            let observed_session = Arc::clone(&session);
            let settled_session = Arc::clone(&session);
            let observed_notify = Arc::clone(&notify);
            let settled_notify = Arc::clone(&notify);
            let observed_id = id.clone();
            let settled_id = id.clone();

            let on_observed = move || -> CallbackResult {
                let signal = lock(&observed_session).note_observed(&observed_id);
                if signal.is_ready() {
                    (&mut *lock(&observed_notify))()
                } else {
                    Ok(())
                }
            };
            let on_settled = move || -> CallbackResult {
                let signal = lock(&settled_session).note_settled(&settled_id);
                if signal.is_ready() {
                    (&mut *lock(&settled_notify))()
                } else {
                    Ok(())
                }
            };

            async move {
                self.synchronizer
                    .synchronize(&id, on_observed, on_settled)
                    .await
            }
        });

        join_all(jobs).await.into_iter().collect()
    }
}

/// First-seen-order deduplication, so a sheet listed twice runs one cycle and
/// the session's completion checks stay meaningful.
fn dedupe(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if seen.insert(id.as_str()) {
            unique.push(id.to_string());
        }
    }
    unique
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
