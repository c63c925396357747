use super::GridCostMap;
use crate::types::{Cost, CostMapPose};

/// Offsets of the 8-connected neighbourhood: cardinals first, then diagonals.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

impl GridCostMap {
    /// Grid-adjacent cells a planner may expand into from `pose`.
    ///
    /// Returns the cardinal and diagonal neighbours that lie inside the grid's
    /// window and whose cost does not exceed `max_cost`.
    ///
    /// # Example
    ///
    /// ```
    /// use costmap_fusion::grid::GridCostMap;
    /// use costmap_fusion::types::{Bounds, CostMapPose, CostMapSource, MIN_COST, OBSTACLE_COST};
    /// use glam::Vec2;
    ///
    /// let mut grid = GridCostMap::new(CostMapSource::ComputerVision, 1.0, true).unwrap();
    /// grid.make_grid(&Bounds::new(Vec2::ZERO, Vec2::new(2.5, 2.5)), MIN_COST).unwrap();
    /// grid.set_cost(2, 1, OBSTACLE_COST);
    ///
    /// let open = grid.neighbors_for(CostMapPose::new(1, 1), OBSTACLE_COST - 1);
    /// assert_eq!(open.len(), 7);
    /// ```
    pub fn neighbors_for(&self, pose: CostMapPose, max_cost: Cost) -> Vec<CostMapPose> {
        let region = self.region();
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| pose.offset(dx, dy))
            .filter(|n| region.contains(n.x, n.y) && self.cost(n.x, n.y) <= max_cost)
            .collect()
    }
}
