//! Thread-safe result accumulation for concurrent traversal branches.

use crate::entry::{EntryRecord, FailureRecord, SearchOutcome};
use parking_lot::Mutex;

/// Shared sink for matches and failures.
///
/// Concurrent appends never lose entries; no ordering is promised. One
/// aggregator (and so one lock) exists per fan-out site, and branches are
/// expected to batch their results so each takes the lock once.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    inner: Mutex<SearchOutcome>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_matches(&self, batch: Vec<EntryRecord>) {
        if batch.is_empty() {
            return;
        }
        self.inner.lock().matches.extend(batch);
    }

    pub fn add_failures(&self, batch: Vec<FailureRecord>) {
        if batch.is_empty() {
            return;
        }
        self.inner.lock().failures.extend(batch);
    }

    /// Append a whole branch outcome in one locked section.
    pub fn add_outcome(&self, outcome: SearchOutcome) {
        if outcome.matches.is_empty() && outcome.failures.is_empty() {
            return;
        }
        self.inner.lock().merge(outcome);
    }

    pub fn into_outcome(self) -> SearchOutcome {
        self.inner.into_inner()
    }
}
