use glam::Vec2;
use tracing::debug;

use super::CostMap;
use crate::grid::GridCostMap;
use crate::types::{BACKGROUND_COST, Bounds, CostMapSource, MIDDLE_COST, MIN_COST, Result};

/// Cost map biased toward a previously traversed path.
///
/// Three tiers: [`MIN_COST`] within half the growing radius of the path,
/// [`MIDDLE_COST`] within the full radius, [`BACKGROUND_COST`] elsewhere.
/// These are final traversal preferences, so the map never asks for inflation.
#[derive(Debug, Clone)]
pub struct PriorTrajectoryCostMap {
    grid: GridCostMap,
    path: Vec<Vec2>,
    path_growing_radius: f32,
}

impl PriorTrajectoryCostMap {
    /// Build the map around `path` (world meters).
    ///
    /// The grid covers the path's bounds grown by `path_growing_radius` plus
    /// `padding` on every side. An empty path gives an invalid map.
    pub fn new(
        resolution: f32,
        path: Vec<Vec2>,
        path_growing_radius: f32,
        padding: f32,
    ) -> Result<Self> {
        let mut grid = GridCostMap::new(CostMapSource::PriorTrajectory, resolution, false)?;

        if let Some(mut bounds) = Bounds::from_points(&path) {
            bounds.expand_by(path_growing_radius + padding);
            grid.make_grid(&bounds, BACKGROUND_COST)?;
            grid.set_inflated_costs(&path, path_growing_radius, MIDDLE_COST);
            grid.set_inflated_costs(&path, path_growing_radius / 2.0, MIN_COST);
            debug!(
                points = path.len(),
                width = grid.width(),
                height = grid.height(),
                "prior trajectory map built"
            );
        }

        Ok(Self {
            grid,
            path,
            path_growing_radius,
        })
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn path_growing_radius(&self) -> f32 {
        self.path_growing_radius
    }
}

impl CostMap for PriorTrajectoryCostMap {
    fn grid(&self) -> &GridCostMap {
        &self.grid
    }
}
