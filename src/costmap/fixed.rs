use super::CostMap;
use crate::grid::GridCostMap;
use crate::types::{CellRegion, Cost, CostMapSource, Result};

/// Immutable grid wrapping a caller-supplied buffer, e.g. a fusion output.
#[derive(Debug, Clone)]
pub struct FixedGridCostMap {
    grid: GridCostMap,
}

impl FixedGridCostMap {
    /// Wrap `costs` (row-major over `region`) as a map that still needs inflation.
    pub fn new(
        source: CostMapSource,
        resolution: f32,
        region: CellRegion,
        costs: Vec<Cost>,
    ) -> Result<Self> {
        Self::with_inflation(source, resolution, region, costs, true)
    }

    /// Wrap a buffer whose costs are already final (no inflation needed).
    pub fn already_inflated(
        source: CostMapSource,
        resolution: f32,
        region: CellRegion,
        costs: Vec<Cost>,
    ) -> Result<Self> {
        Self::with_inflation(source, resolution, region, costs, false)
    }

    pub fn with_inflation(
        source: CostMapSource,
        resolution: f32,
        region: CellRegion,
        costs: Vec<Cost>,
        requires_inflation: bool,
    ) -> Result<Self> {
        let grid =
            GridCostMap::from_costs(source, resolution, region, costs, requires_inflation)?;
        Ok(Self { grid })
    }

    /// Invalid map with no cells.
    pub fn invalid(
        source: CostMapSource,
        resolution: f32,
        requires_inflation: bool,
    ) -> Result<Self> {
        Self::with_inflation(
            source,
            resolution,
            CellRegion::empty(),
            Vec::new(),
            requires_inflation,
        )
    }

    /// Freeze a grid snapshot as-is.
    pub fn from_grid(grid: GridCostMap) -> Self {
        Self { grid }
    }

    pub fn costs(&self) -> &[Cost] {
        self.grid.costs()
    }

    /// Consume the map, returning the underlying grid.
    pub fn into_grid(self) -> GridCostMap {
        self.grid
    }
}

impl CostMap for FixedGridCostMap {
    fn grid(&self) -> &GridCostMap {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::types::{MAX_COST, MIN_COST};

    #[test]
    fn wraps_buffer_verbatim() {
        let region = CellRegion::new(IVec2::new(2, -1), IVec2::new(4, 1));
        let map =
            FixedGridCostMap::new(CostMapSource::VolumetricMap, 0.05, region, vec![1, 2, 3, 4])
                .unwrap();

        assert!(map.is_valid());
        assert!(map.requires_inflation());
        assert_eq!(map.cost(2, -1), 1);
        assert_eq!(map.cost(3, -1), 2);
        assert_eq!(map.cost(2, 0), 3);
        assert_eq!(map.cost(3, 0), 4);
        assert_eq!(map.cost(4, 0), MAX_COST);
        assert_eq!(map.costs(), &[1, 2, 3, 4]);
    }

    #[test]
    fn already_inflated_skips_inflation() {
        let region = CellRegion::new(IVec2::ZERO, IVec2::ONE);
        let map = FixedGridCostMap::already_inflated(
            CostMapSource::FullyInflated,
            0.05,
            region,
            vec![MIN_COST],
        )
        .unwrap();
        assert!(!map.requires_inflation());
    }

    #[test]
    fn rejects_mismatched_buffer() {
        let region = CellRegion::new(IVec2::ZERO, IVec2::new(3, 3));
        assert!(
            FixedGridCostMap::new(CostMapSource::VolumetricMap, 0.05, region, vec![0; 8]).is_err()
        );
    }

    #[test]
    fn invalid_map_reads_max_cost() {
        let map = FixedGridCostMap::invalid(CostMapSource::VolumetricMap, 0.05, true).unwrap();
        assert!(!map.is_valid());
        assert!(map.region().is_empty());
        assert_eq!(map.cost(0, 0), MAX_COST);
    }
}
