//! One fusion and inflation cycle over the current producer maps.
//!
//! Scheduling stays with the caller: each call to [`FusionPipeline::run`]
//! fuses the valid maps it is given, inflates the result at full and factor
//! radius and returns both grids.

use tracing::debug;

use crate::costmap::{CostMap, FixedGridCostMap};
use crate::fusion::CostMapFuser;
use crate::inflation::CostMapInflator;
use crate::shared::SharedCostMap;
use crate::types::{CostMapSource, Result};

/// The two grids handed to planners after a cycle.
#[derive(Debug, Clone)]
pub struct InflatedCostMaps {
    pub fully_inflated: FixedGridCostMap,
    pub proportionally_inflated: FixedGridCostMap,
}

impl InflatedCostMaps {
    /// Publish both grids for concurrent readers.
    pub fn publish(&self, fully_inflated: &SharedCostMap, proportionally_inflated: &SharedCostMap) {
        fully_inflated.publish(&self.fully_inflated);
        proportionally_inflated.publish(&self.proportionally_inflated);
    }
}

/// Fuser and inflator wired together.
pub struct FusionPipeline {
    fuser: Box<dyn CostMapFuser>,
    inflator: Box<dyn CostMapInflator>,
}

impl FusionPipeline {
    pub fn new(fuser: Box<dyn CostMapFuser>, inflator: Box<dyn CostMapInflator>) -> Self {
        Self { fuser, inflator }
    }

    pub fn inflator(&self) -> &dyn CostMapInflator {
        self.inflator.as_ref()
    }

    /// Run one cycle.
    ///
    /// Invalid maps are skipped. Maps that still need inflation are fused and
    /// inflated; maps whose costs are already final (such as a prior
    /// trajectory) are fused on top of each inflated grid afterwards, so
    /// their low-cost corridors are not swallowed by inflation.
    pub fn run(&self, maps: &[&dyn CostMap]) -> Result<InflatedCostMaps> {
        let (raw, settled): (Vec<&dyn CostMap>, Vec<&dyn CostMap>) = maps
            .iter()
            .copied()
            .filter(|m| m.is_valid())
            .partition(|m| m.requires_inflation());
        debug!(
            raw = raw.len(),
            settled = settled.len(),
            skipped = maps.len() - raw.len() - settled.len(),
            "running fusion cycle"
        );

        let (full, partial) = if raw.is_empty() {
            let resolution = self.inflator.settings().resolution;
            let proportional = CostMapSource::ProportionallyInflated;
            (
                FixedGridCostMap::invalid(CostMapSource::FullyInflated, resolution, false)?,
                FixedGridCostMap::invalid(proportional, resolution, false)?,
            )
        } else {
            let fused = self.fuser.fuse_cost_maps(&raw, CostMapSource::FullyInflated)?;
            (
                self.inflator.inflate_cost_map_full_radius(&fused)?,
                self.inflator.inflate_cost_map_factor_radius(&fused)?,
            )
        };

        if settled.is_empty() {
            return Ok(InflatedCostMaps {
                fully_inflated: full,
                proportionally_inflated: partial,
            });
        }

        Ok(InflatedCostMaps {
            fully_inflated: self.overlay(&full, &settled, CostMapSource::FullyInflated)?,
            proportionally_inflated: self.overlay(
                &partial,
                &settled,
                CostMapSource::ProportionallyInflated,
            )?,
        })
    }

    fn overlay(
        &self,
        inflated: &FixedGridCostMap,
        settled: &[&dyn CostMap],
        output_source: CostMapSource,
    ) -> Result<FixedGridCostMap> {
        let mut maps: Vec<&dyn CostMap> = Vec::with_capacity(settled.len() + 1);
        maps.push(inflated);
        maps.extend_from_slice(settled);
        self.fuser.fuse_cost_maps(&maps, output_source)
    }
}

#[cfg(test)]
mod tests {
    use glam::{IVec2, Vec2};

    use super::*;
    use crate::config::CostMapConfig;
    use crate::costmap::PriorTrajectoryCostMap;
    use crate::types::{CellRegion, MAX_COST, MIDDLE_COST, MIN_COST, OBSTACLE_COST};

    fn config() -> CostMapConfig {
        CostMapConfig {
            resolution: 1.0,
            robot_radius: 2.0,
            radius_factor: 0.5,
            ..Default::default()
        }
    }

    fn obstacle_map() -> FixedGridCostMap {
        let region = CellRegion::new(IVec2::ZERO, IVec2::new(9, 1));
        let mut costs = vec![MIN_COST; 9];
        costs[0] = OBSTACLE_COST;
        FixedGridCostMap::new(CostMapSource::VolumetricMap, 1.0, region, costs).unwrap()
    }

    #[test]
    fn inflates_at_both_radii() {
        let pipeline = config().fusion_pipeline().unwrap();
        let obstacles = obstacle_map();

        let out = pipeline.run(&[&obstacles]).unwrap();

        assert_eq!(out.fully_inflated.source(), CostMapSource::FullyInflated);
        assert_eq!(
            out.proportionally_inflated.source(),
            CostMapSource::ProportionallyInflated
        );
        assert_eq!(out.fully_inflated.cost(2, 0), MAX_COST);
        assert_eq!(out.fully_inflated.cost(3, 0), MIN_COST);
        assert_eq!(out.proportionally_inflated.cost(1, 0), MAX_COST);
        assert_eq!(out.proportionally_inflated.cost(2, 0), MIN_COST);
    }

    #[test]
    fn settled_maps_are_fused_after_inflation() {
        let pipeline = config().fusion_pipeline().unwrap();
        let obstacles = obstacle_map();
        let trajectory =
            PriorTrajectoryCostMap::new(1.0, vec![Vec2::new(6.5, 0.5)], 2.0, 0.0).unwrap();

        let out = pipeline.run(&[&obstacles, &trajectory]).unwrap();
        let full = &out.fully_inflated;

        assert!(!full.requires_inflation());
        assert_eq!(full.cost(6, 0), MIN_COST);
        assert_eq!(full.cost(8, 0), MIDDLE_COST);
        assert_eq!(full.cost(0, 0), MAX_COST);
        // the trajectory window reaches past the obstacle map
        assert_eq!(full.upper_y_limit(), 3);
    }

    #[test]
    fn no_valid_input_gives_invalid_outputs() {
        let pipeline = config().fusion_pipeline().unwrap();
        let invalid = FixedGridCostMap::invalid(CostMapSource::VolumetricMap, 1.0, true).unwrap();

        let out = pipeline.run(&[&invalid]).unwrap();
        assert!(!out.fully_inflated.is_valid());
        assert!(!out.proportionally_inflated.is_valid());
    }

    #[test]
    fn publishes_both_outputs() {
        let pipeline = config().fusion_pipeline().unwrap();
        let obstacles = obstacle_map();
        let out = pipeline.run(&[&obstacles]).unwrap();

        let full = SharedCostMap::new(out.fully_inflated.grid().clone());
        let partial = SharedCostMap::new(out.proportionally_inflated.grid().clone());
        let next = pipeline.run(&[]).unwrap();
        next.publish(&full, &partial);

        assert!(!full.snapshot().is_valid());
        assert!(!partial.snapshot().is_valid());
    }
}
