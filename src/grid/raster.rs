//! Writing shapes into a [`GridCostMap`]: circular stamps along a path and
//! polygon outlines.
//!
//! Every write goes through copy-on-write, so snapshots taken before the call
//! keep their old contents. Cells outside the window are silently skipped.

use glam::Vec2;

use super::GridCostMap;
use crate::iterators::PolygonOutline;
use crate::types::{Cost, CostMapPose, OBSTACLE_COST};

impl GridCostMap {
    /// Overwrite every in-window cell within a circle around `pose`.
    ///
    /// The radius is rounded to whole cells and the mask keeps offsets with
    /// `dx^2 + dy^2 <= r^2`. Last write wins; existing costs are not max-merged.
    pub fn inflate_cost(&mut self, pose: CostMapPose, radius: f32, cost: Cost) {
        if !self.is_valid() {
            return;
        }
        // Saturating cast keeps r * r inside i64.
        let r = i64::from((radius / self.resolution()).round().max(0.0) as i32);
        let region = self.region();
        let (px, py) = (pose.x as i64, pose.y as i64);
        // Only the part of the mask that overlaps the window is walked.
        let dx_lo = (-r).max(region.min.x as i64 - px);
        let dx_hi = r.min(region.max.x as i64 - 1 - px);
        let dy_lo = (-r).max(region.min.y as i64 - py);
        let dy_hi = r.min(region.max.y as i64 - 1 - py);
        let state = self.state_mut();
        for dy in dy_lo..=dy_hi {
            for dx in dx_lo..=dx_hi {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                if let Some(idx) = region.index_of((px + dx) as i32, (py + dy) as i32) {
                    state.costs[idx] = cost;
                }
            }
        }
    }

    /// [`Self::inflate_cost`] around every point of a world-space path.
    pub fn set_inflated_costs(&mut self, path: &[Vec2], radius: f32, cost: Cost) {
        for point in path {
            let pose = self.discretize(*point);
            self.inflate_cost(pose, radius, cost);
        }
    }

    /// Mark the outline of a closed polygon (world coordinates) as obstacle.
    ///
    /// Only the boundary is drawn; the interior keeps its cost.
    pub fn draw_polygon_on_grid(&mut self, vertices: &[Vec2]) {
        self.draw_polygon_on_grid_with_cost(vertices, OBSTACLE_COST);
    }

    /// Like [`Self::draw_polygon_on_grid`] but with an explicit cost.
    pub fn draw_polygon_on_grid_with_cost(&mut self, vertices: &[Vec2], cost: Cost) {
        if !self.is_valid() || vertices.is_empty() {
            return;
        }
        let region = self.region();
        let resolution = self.resolution();
        let state = self.state_mut();
        for cell in PolygonOutline::new(vertices, resolution) {
            if let Some(idx) = region.index_of(cell.x, cell.y) {
                state.costs[idx] = cost;
            }
        }
    }
}
