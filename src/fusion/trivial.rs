use tracing::debug;

use super::CostMapFuser;
use crate::costmap::{CostMap, FixedGridCostMap};
use crate::grid::GridCostMap;
use crate::types::error::invalid_argument;
use crate::types::{
    CellRegion, Cost, CostMapSource, MAX_FREE_COST, MIN_COST, OBSTACLE_COST, Result, is_obstacle,
};

/// Obstacle-dominant, clamped-sum merge of one incoming cost into an
/// accumulated one.
#[inline]
pub fn merge_cost(accumulated: Cost, incoming: Cost) -> Cost {
    if is_obstacle(accumulated) || is_obstacle(incoming) {
        return OBSTACLE_COST;
    }
    let sum = accumulated as i16 + incoming as i16;
    sum.clamp(MIN_COST as i16, MAX_FREE_COST as i16) as Cost
}

/// Sums every map into a zero-initialised grid over the union of their windows.
///
/// A map contributes only inside its own window; cells it does not cover are
/// left alone rather than read as unknown. Obstacles win irreversibly and
/// other costs add up, clamped to [`MAX_FREE_COST`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TrivialCostMapFuser;

impl TrivialCostMapFuser {
    pub fn new() -> Self {
        Self
    }
}

impl CostMapFuser for TrivialCostMapFuser {
    fn fuse_cost_maps(
        &self,
        maps: &[&dyn CostMap],
        output_source: CostMapSource,
    ) -> Result<FixedGridCostMap> {
        // Snapshot each input once so window and buffer stay paired.
        let grids: Vec<GridCostMap> = maps
            .iter()
            .map(|m| m.snapshot())
            .filter(|g| g.is_valid())
            .collect();

        let Some(resolution) = grids.first().map(|g| g.resolution()) else {
            debug!(output = %output_source, "nothing valid to fuse");
            let resolution = maps.first().map_or(1.0, |m| m.resolution());
            return FixedGridCostMap::invalid(output_source, resolution, true);
        };
        if let Some(odd) = grids.iter().find(|g| g.resolution() != resolution) {
            return Err(invalid_argument(format!(
                "cannot fuse {} at resolution {} with resolution {}",
                odd.source(),
                odd.resolution(),
                resolution
            )));
        }

        let region = grids
            .iter()
            .fold(CellRegion::empty(), |acc, g| acc.union(&g.region()));
        let mut fused = vec![MIN_COST; region.area()];
        let width = region.width() as usize;

        for grid in &grids {
            let window = grid.region();
            let src_width = window.width() as usize;
            let x_offset = (window.min.x - region.min.x) as usize;
            for (row, src) in grid.costs().chunks_exact(src_width).enumerate() {
                let y = (window.min.y - region.min.y) as usize + row;
                let start = y * width + x_offset;
                for (acc, &incoming) in fused[start..start + src_width].iter_mut().zip(src) {
                    *acc = merge_cost(*acc, incoming);
                }
            }
        }

        let requires_inflation = grids.iter().any(|g| g.requires_inflation());
        debug!(
            output = %output_source,
            inputs = grids.len(),
            width = region.width(),
            height = region.height(),
            "fused cost maps"
        );
        FixedGridCostMap::with_inflation(
            output_source,
            resolution,
            region,
            fused,
            requires_inflation,
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::types::MAX_COST;

    fn map(min: IVec2, size: IVec2, costs: Vec<Cost>) -> FixedGridCostMap {
        let region = CellRegion::new(min, min + size);
        FixedGridCostMap::new(CostMapSource::VolumetricMap, 0.1, region, costs).unwrap()
    }

    #[test]
    fn merge_cost_rules() {
        assert_eq!(merge_cost(MAX_COST, 0), OBSTACLE_COST);
        assert_eq!(merge_cost(3, MAX_COST), OBSTACLE_COST);
        assert_eq!(merge_cost(3, 4), 7);
        assert_eq!(merge_cost(100, 100), MAX_FREE_COST);
        assert_eq!(merge_cost(MAX_FREE_COST, MAX_FREE_COST), MAX_FREE_COST);
    }

    #[test]
    fn identical_obstacle_grids_stay_obstacle() {
        let a = map(IVec2::ZERO, IVec2::splat(5), vec![MAX_COST; 25]);
        let b = a.clone();
        let fused = TrivialCostMapFuser
            .fuse_cost_maps(&[&a, &b], CostMapSource::FullyInflated)
            .unwrap();
        assert_eq!(fused.costs(), &[MAX_COST; 25][..]);
    }

    #[test]
    fn complementary_patterns_keep_every_obstacle() {
        let a_costs: Vec<Cost> = (0..25)
            .map(|i| if i % 2 == 0 { MAX_COST } else { MIN_COST })
            .collect();
        let b_costs: Vec<Cost> = (0..25)
            .map(|i| if i % 2 == 0 { MIN_COST } else { MAX_COST })
            .collect();
        let a = map(IVec2::ZERO, IVec2::splat(5), a_costs);
        let b = map(IVec2::ZERO, IVec2::splat(5), b_costs);

        let fused = TrivialCostMapFuser
            .fuse_cost_maps(&[&a, &b], CostMapSource::FullyInflated)
            .unwrap();
        assert!(fused.costs().iter().all(|&c| c == MAX_COST));
    }

    #[test]
    fn offset_maps_contribute_only_inside_their_windows() {
        let a = map(IVec2::new(0, 0), IVec2::new(2, 1), vec![5, MAX_COST]);
        let b = map(IVec2::new(1, 1), IVec2::new(2, 1), vec![7, 9]);

        let fused = TrivialCostMapFuser
            .fuse_cost_maps(&[&a, &b], CostMapSource::ProportionallyInflated)
            .unwrap();

        assert_eq!(fused.source(), CostMapSource::ProportionallyInflated);
        assert_eq!(fused.region(), CellRegion::new(IVec2::ZERO, IVec2::new(3, 2)));
        #[rustfmt::skip]
        let expected = vec![
            5, MAX_COST, MIN_COST,
            MIN_COST, 7, 9,
        ];
        assert_eq!(fused.costs(), &expected[..]);
    }

    #[test]
    fn single_map_round_trips() {
        let costs: Vec<Cost> = (0..12).map(|i| (i * 9) as Cost).collect();
        let a = map(IVec2::new(-2, 3), IVec2::new(4, 3), costs.clone());

        let fused = TrivialCostMapFuser
            .fuse_cost_maps(&[&a], CostMapSource::FullyInflated)
            .unwrap();

        assert_eq!(fused.region(), a.region());
        assert_eq!(
            fused.grid().cost_region(-2, 3, 2, 6).unwrap(),
            a.grid().cost_region(-2, 3, 2, 6).unwrap()
        );
    }

    #[test]
    fn invalid_inputs_are_ignored() {
        let invalid = FixedGridCostMap::invalid(CostMapSource::Bumper, 0.1, true).unwrap();
        let fused = TrivialCostMapFuser
            .fuse_cost_maps(&[&invalid], CostMapSource::FullyInflated)
            .unwrap();
        assert!(!fused.is_valid());

        let a = map(IVec2::new(4, 4), IVec2::ONE, vec![3]);
        let fused = TrivialCostMapFuser
            .fuse_cost_maps(&[&invalid, &a], CostMapSource::FullyInflated)
            .unwrap();
        assert_eq!(fused.region(), a.region());
        assert_eq!(fused.cost(4, 4), 3);
    }

    #[test]
    fn mismatched_resolution_is_rejected() {
        let a = map(IVec2::ZERO, IVec2::ONE, vec![0]);
        let b = FixedGridCostMap::new(
            CostMapSource::FloorPlan,
            0.2,
            CellRegion::new(IVec2::ZERO, IVec2::ONE),
            vec![0],
        )
        .unwrap();
        assert!(
            TrivialCostMapFuser
                .fuse_cost_maps(&[&a, &b], CostMapSource::FullyInflated)
                .is_err()
        );
    }

    #[test]
    fn fused_inflation_flag_follows_inputs() {
        let region = CellRegion::new(IVec2::ZERO, IVec2::ONE);
        let done =
            FixedGridCostMap::already_inflated(CostMapSource::PriorTrajectory, 0.1, region, vec![1])
                .unwrap();
        let raw = map(IVec2::ZERO, IVec2::ONE, vec![2]);

        let only_done = TrivialCostMapFuser
            .fuse_cost_maps(&[&done], CostMapSource::FullyInflated)
            .unwrap();
        assert!(!only_done.requires_inflation());

        let mixed = TrivialCostMapFuser
            .fuse_cost_maps(&[&done, &raw], CostMapSource::FullyInflated)
            .unwrap();
        assert!(mixed.requires_inflation());
        assert_eq!(mixed.cost(0, 0), 3);
    }
}
