use super::{CostMapInflator, InflatorSettings, inflated_cost};
use crate::grid::GridCostMap;
use crate::types::{Cost, Result, is_obstacle};

/// Reference inflator: one clamped window query per non-obstacle cell.
#[derive(Debug, Clone)]
pub struct SimpleCostMapInflator {
    settings: InflatorSettings,
}

impl SimpleCostMapInflator {
    pub fn new(settings: InflatorSettings) -> Self {
        Self { settings }
    }
}

impl CostMapInflator for SimpleCostMapInflator {
    fn settings(&self) -> &InflatorSettings {
        &self.settings
    }

    fn inflate_cells(&self, grid: &GridCostMap, radius_cells: u32) -> Result<Vec<Cost>> {
        let region = grid.region();
        // A window wider than the grid clamps to the same cells.
        let r = radius_cells.min(region.width().max(region.height())) as i32;
        let mut out = grid.costs().to_vec();

        for (idx, cell) in region.cells().enumerate() {
            if is_obstacle(out[idx]) {
                continue;
            }
            // Clamp to the window so nothing outside reads as an obstacle.
            let x0 = (cell.x - r).max(region.min.x);
            let y0 = (cell.y - r).max(region.min.y);
            let x1 = (cell.x + r + 1).min(region.max.x);
            let y1 = (cell.y + r + 1).min(region.max.y);
            let highest = grid.highest_cost_in_region(x0, y0, x1, y1)?;
            out[idx] = inflated_cost(highest);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::costmap::{CostMap, FixedGridCostMap};
    use crate::types::{
        CellRegion, CostMapSource, INSCRIBED_INFLATED_OBSTACLE, MAX_COST, MIN_COST, OBSTACLE_COST,
    };

    fn inflator(robot_radius: f32) -> SimpleCostMapInflator {
        SimpleCostMapInflator::new(InflatorSettings::new(1.0, robot_radius, 0.5).unwrap())
    }

    fn map(width: i32, height: i32, costs: Vec<Cost>) -> FixedGridCostMap {
        let region = CellRegion::new(IVec2::ZERO, IVec2::new(width, height));
        FixedGridCostMap::new(CostMapSource::ComputerVision, 1.0, region, costs).unwrap()
    }

    #[test]
    fn single_obstacle_bleeds_square() {
        let mut costs = vec![MIN_COST; 25];
        costs[2 * 5 + 2] = OBSTACLE_COST;
        let out = inflator(1.0).inflate_cost_map_full_radius(&map(5, 5, costs)).unwrap();

        assert_eq!(out.source(), CostMapSource::FullyInflated);
        assert!(!out.requires_inflation());
        // square window: the diagonal neighbour is reached too
        assert_eq!(out.cost(1, 1), MAX_COST);
        assert_eq!(out.cost(3, 2), MAX_COST);
        assert_eq!(out.cost(0, 0), MIN_COST);
        assert_eq!(out.cost(4, 2), MIN_COST);
    }

    #[test]
    fn high_costs_saturate_at_inscribed() {
        let mut costs = vec![MIN_COST; 9];
        costs[0] = 110;
        costs[8] = 30;
        let out = inflator(1.0).inflate_cost_map_full_radius(&map(3, 3, costs)).unwrap();

        assert_eq!(out.cost(0, 0), INSCRIBED_INFLATED_OBSTACLE);
        assert_eq!(out.cost(1, 1), INSCRIBED_INFLATED_OBSTACLE);
        assert_eq!(out.cost(2, 2), 30);
        assert_eq!(out.cost(2, 1), 30);
    }

    #[test]
    fn window_is_clamped_to_grid() {
        // Border cells must not see the out-of-window MAX_COST sentinel.
        let out = inflator(2.0)
            .inflate_cost_map_full_radius(&map(3, 2, vec![MIN_COST; 6]))
            .unwrap();
        assert!(out.costs().iter().all(|&c| c == MIN_COST));
    }

    #[test]
    fn factor_radius_uses_smaller_window() {
        let mut costs = vec![MIN_COST; 7];
        costs[0] = OBSTACLE_COST;
        let m = map(7, 1, costs);
        let inflator = inflator(4.0);

        let full = inflator.inflate_cost_map_full_radius(&m).unwrap();
        let partial = inflator.inflate_cost_map_factor_radius(&m).unwrap();

        assert_eq!(partial.source(), CostMapSource::ProportionallyInflated);
        assert_eq!(full.cost(4, 0), MAX_COST);
        assert_eq!(full.cost(5, 0), MIN_COST);
        assert_eq!(partial.cost(2, 0), MAX_COST);
        assert_eq!(partial.cost(3, 0), MIN_COST);
    }

    #[test]
    fn radius_far_beyond_grid_covers_whole_window() {
        let settings = InflatorSettings::new(0.05, 1.0e9, 1.0).unwrap();
        let inflator = SimpleCostMapInflator::new(settings);
        let region = CellRegion::new(IVec2::ZERO, IVec2::new(3, 1));
        let m = FixedGridCostMap::new(
            CostMapSource::ComputerVision,
            0.05,
            region,
            vec![OBSTACLE_COST, MIN_COST, MIN_COST],
        )
        .unwrap();

        let out = inflator.inflate_cost_map_full_radius(&m).unwrap();
        assert_eq!(out.costs(), &[MAX_COST, MAX_COST, MAX_COST]);
    }

    #[test]
    fn invalid_input_gives_invalid_output() {
        let m = FixedGridCostMap::invalid(CostMapSource::ComputerVision, 1.0, true).unwrap();
        let out = inflator(1.0).inflate_cost_map_full_radius(&m).unwrap();
        assert!(!out.is_valid());
        assert_eq!(out.source(), CostMapSource::FullyInflated);
    }

    #[test]
    fn resolution_mismatch_is_rejected() {
        let region = CellRegion::new(IVec2::ZERO, IVec2::ONE);
        let m = FixedGridCostMap::new(CostMapSource::ComputerVision, 0.5, region, vec![0]).unwrap();
        assert!(inflator(1.0).inflate_cost_map_full_radius(&m).is_err());
    }
}
