//! Handing cost maps from a producer thread to reader threads.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::costmap::CostMap;
use crate::grid::GridCostMap;

/// Cloneable publication slot holding the latest snapshot of one cost map.
///
/// The lock only guards swapping an `Arc`-backed snapshot in or out, so a
/// reader always gets a window and buffer from the same update and never
/// waits on grid arithmetic.
#[derive(Debug, Clone)]
pub struct SharedCostMap {
    inner: Arc<RwLock<GridCostMap>>,
}

impl SharedCostMap {
    pub fn new(initial: GridCostMap) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Replace the published snapshot with the current state of `map`.
    pub fn publish(&self, map: &dyn CostMap) {
        let snapshot = map.snapshot();
        *self.inner.write() = snapshot;
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> GridCostMap {
        self.inner.read().clone()
    }
}

impl From<GridCostMap> for SharedCostMap {
    fn from(grid: GridCostMap) -> Self {
        Self::new(grid)
    }
}
