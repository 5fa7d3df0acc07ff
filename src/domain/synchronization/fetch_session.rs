//! Per-batch coordination state.
//!
//! One [`FetchSession`] tracks a single batch request. Observe and settle
//! events from the concurrently running sheet synchronizations are folded in
//! through [`FetchSession::note_observed`] and [`FetchSession::note_settled`],
//! whose return value tells the coordinator whether the batch callback must
//! fire. The decision depends only on set membership and two monotonic flags,
//! so it is invariant under the order in which in-flight retrievals resolve.

use std::collections::HashSet;

use log::debug;
use uuid::Uuid;

use crate::domain::sheet::SheetId;

/// Verdict returned after folding one event into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSignal {
    /// Nothing to announce yet.
    Pending,
    /// The batch callback must be invoked now.
    Ready,
}

impl BatchSignal {
    pub fn is_ready(self) -> bool {
        matches!(self, BatchSignal::Ready)
    }
}

#[derive(Debug)]
pub struct FetchSession {
    batch_id: Uuid,
    requested: HashSet<SheetId>,
    have_data: HashSet<SheetId>,
    settled: HashSet<SheetId>,
    first_wave_pending: bool,
    recall_needed: bool,
}

impl FetchSession {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SheetId>,
    {
        Self {
            batch_id: Uuid::new_v4(),
            requested: ids.into_iter().map(Into::into).collect(),
            have_data: HashSet::new(),
            settled: HashSet::new(),
            first_wave_pending: true,
            recall_needed: false,
        }
    }

    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    pub fn is_complete(&self) -> bool {
        self.covers(&self.settled)
    }

    /// Fold in a "data observed" event for `id`.
    ///
    /// A second observation of the same sheet means its revalidated value
    /// differs from the one already served, so the batch must be announced
    /// again once everything has settled. The flag is monotonic within the
    /// session: once set it stays set, even if a later sheet settles without
    /// changes.
    pub fn note_observed(&mut self, id: &str) -> BatchSignal {
        if self.have_data.contains(id) {
            self.recall_needed = true;
        }
        self.have_data.insert(id.to_string());

        if self.first_wave_pending && self.covers(&self.have_data) {
            self.first_wave_pending = false;
            debug!("batch {}: first wave complete", self.batch_id);
            return BatchSignal::Ready;
        }
        BatchSignal::Pending
    }

    /// Fold in a "settled" event for `id`.
    ///
    /// Fires when the last sheet settles and either a re-announcement is due
    /// or the first wave never completed on the observe path (a batch where
    /// no sheet produced data still settles exactly once).
    pub fn note_settled(&mut self, id: &str) -> BatchSignal {
        self.settled.insert(id.to_string());

        if (self.recall_needed || self.first_wave_pending) && self.covers(&self.settled) {
            debug!("batch {}: all sheets settled, announcing", self.batch_id);
            return BatchSignal::Ready;
        }
        BatchSignal::Pending
    }

    fn covers(&self, seen: &HashSet<SheetId>) -> bool {
        self.requested.iter().all(|id| seen.contains(id))
    }
}
