use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use super::model::Dataset;

/// Holds the current dataset snapshot.
///
/// Readers take an `Arc<Dataset>` and keep a consistent view for as long as
/// they hold it; a reload publishes a fresh snapshot instead of touching the
/// one in use.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: ArcSwapOption<Dataset>,
    generation: AtomicU64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new snapshot and return it.
    pub fn publish(&self, dataset: Dataset) -> Arc<Dataset> {
        let snapshot = Arc::new(dataset);
        self.current.store(Some(Arc::clone(&snapshot)));
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        log::info!(
            "Published dataset snapshot #{generation} with {} records",
            snapshot.len()
        );
        snapshot
    }

    /// The latest published snapshot, if any.
    pub fn load(&self) -> Option<Arc<Dataset>> {
        self.current.load_full()
    }

    /// Number of snapshots published so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
