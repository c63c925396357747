//! Merging independently bounded cost maps into one grid.

mod trivial;

pub use trivial::{TrivialCostMapFuser, merge_cost};

use crate::costmap::{CostMap, FixedGridCostMap};
use crate::types::{CostMapSource, Result};

/// Combines a heterogeneous collection of cost maps into one immutable grid.
pub trait CostMapFuser: Send + Sync {
    /// Fuse `maps` into a map tagged `output_source` that covers the union of
    /// their windows.
    fn fuse_cost_maps(
        &self,
        maps: &[&dyn CostMap],
        output_source: CostMapSource,
    ) -> Result<FixedGridCostMap>;
}
