use std::sync::Arc;

use glam::{IVec2, Vec2};
use tracing::trace;

use crate::types::error::invalid_argument;
use crate::types::{
    Bounds, CellRegion, Cost, CostMapPose, CostMapSource, GRID_EPSILON, MAX_COST, Result,
};

/// Bucket a world position into the cell that contains it.
///
/// Plain floor division: cell `i` covers `[i * resolution, (i + 1) * resolution)`.
#[inline]
pub fn discretize(position: Vec2, resolution: f32) -> CostMapPose {
    let cell = (position / resolution).floor();
    CostMapPose::new(cell.x as i32, cell.y as i32)
}

/// Cell window and buffer, always replaced or copied as one unit.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GridState {
    pub(crate) valid: bool,
    pub(crate) region: CellRegion,
    pub(crate) costs: Vec<Cost>,
}

impl GridState {
    fn invalid() -> Self {
        Self {
            valid: false,
            region: CellRegion::empty(),
            costs: Vec::new(),
        }
    }
}

/// Dense cost grid over a window of the infinite cell plane.
///
/// The window and the buffer live together behind an [`Arc`], so cloning a
/// `GridCostMap` is a cheap snapshot: later writes through the original never
/// show up in the clone, and a clone never sees a window paired with a buffer
/// from a different update. Reads outside the window return [`MAX_COST`].
#[derive(Debug, Clone)]
pub struct GridCostMap {
    source: CostMapSource,
    resolution: f32,
    requires_inflation: bool,
    state: Arc<GridState>,
}

impl GridCostMap {
    /// Create an invalid, empty grid.
    pub fn new(source: CostMapSource, resolution: f32, requires_inflation: bool) -> Result<Self> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(invalid_argument(format!(
                "resolution must be positive, got {resolution}"
            )));
        }
        Ok(Self {
            source,
            resolution,
            requires_inflation,
            state: Arc::new(GridState::invalid()),
        })
    }

    /// Wrap an existing buffer laid out row-major over `region`.
    ///
    /// A non-empty region makes the grid valid; an empty one must come with an
    /// empty buffer and yields an invalid grid.
    pub fn from_costs(
        source: CostMapSource,
        resolution: f32,
        region: CellRegion,
        costs: Vec<Cost>,
        requires_inflation: bool,
    ) -> Result<Self> {
        let mut grid = Self::new(source, resolution, requires_inflation)?;
        if region.max.x < region.min.x || region.max.y < region.min.y {
            return Err(invalid_argument(format!(
                "negative grid size for region {region:?}"
            )));
        }
        if costs.len() != region.area() {
            return Err(invalid_argument(format!(
                "data length {} does not match map size {}",
                costs.len(),
                region.area()
            )));
        }
        if !region.is_empty() {
            grid.state = Arc::new(GridState {
                valid: true,
                region,
                costs,
            });
        }
        Ok(grid)
    }

    pub fn source(&self) -> CostMapSource {
        self.source
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub fn is_valid(&self) -> bool {
        self.state.valid
    }

    pub fn requires_inflation(&self) -> bool {
        self.requires_inflation
    }

    /// Window of cells this grid holds data for.
    pub fn region(&self) -> CellRegion {
        self.state.region
    }

    pub fn width(&self) -> u32 {
        self.state.region.width()
    }

    pub fn height(&self) -> u32 {
        self.state.region.height()
    }

    /// Row-major cost buffer covering [`Self::region`].
    pub fn costs(&self) -> &[Cost] {
        &self.state.costs
    }

    /// Consistent copy of the current window and buffer.
    pub fn snapshot(&self) -> GridCostMap {
        self.clone()
    }

    /// Cost of a cell, or [`MAX_COST`] outside the window.
    #[inline]
    pub fn cost(&self, x: i32, y: i32) -> Cost {
        match self.state.region.index_of(x, y) {
            Some(idx) => self.state.costs[idx],
            None => MAX_COST,
        }
    }

    pub fn cost_at_pose(&self, pose: CostMapPose) -> Cost {
        self.cost(pose.x, pose.y)
    }

    pub fn cost_at_position(&self, position: Vec2) -> Cost {
        self.cost_at_pose(self.discretize(position))
    }

    pub fn discretize(&self, position: Vec2) -> CostMapPose {
        discretize(position, self.resolution)
    }

    /// Every cell in the window, row-major.
    pub fn all_poses(&self) -> Vec<CostMapPose> {
        self.state.region.cells().map(CostMapPose::from).collect()
    }

    /// Replace the grid with a fresh buffer covering the world rectangle
    /// `bounds`, every cell set to `initial_cost`.
    ///
    /// A maximum lying exactly on a cell boundary still gets that cell.
    pub fn make_grid(&mut self, bounds: &Bounds, initial_cost: Cost) -> Result<()> {
        let region = self.region_for(bounds)?;
        trace!(
            source = %self.source,
            width = region.width(),
            height = region.height(),
            "allocating grid"
        );
        self.state = Arc::new(GridState {
            valid: true,
            region,
            costs: vec![initial_cost; region.area()],
        });
        Ok(())
    }

    /// Cell window `make_grid` would allocate for `bounds`.
    pub fn region_for(&self, bounds: &Bounds) -> Result<CellRegion> {
        let min = (bounds.min / self.resolution).floor();
        let max = (bounds.max / self.resolution + Vec2::splat(GRID_EPSILON)).ceil();
        if !(min.is_finite() && max.is_finite()) {
            return Err(invalid_argument(format!("non-finite bounds {bounds:?}")));
        }
        let region = CellRegion::new(
            IVec2::new(min.x as i32, min.y as i32),
            IVec2::new(max.x as i32, max.y as i32),
        );
        if region.min.x >= region.max.x || region.min.y >= region.max.y {
            return Err(invalid_argument(format!(
                "bounds {bounds:?} produce an empty grid {region:?}"
            )));
        }
        Ok(region)
    }

    /// Drop the buffer and mark the grid invalid. Every cell reads as [`MAX_COST`].
    pub fn invalidate(&mut self) {
        if self.state.valid || !self.state.costs.is_empty() {
            self.state = Arc::new(GridState::invalid());
        }
    }

    /// Overwrite one cell. Returns false (and writes nothing) outside the window.
    pub fn set_cost(&mut self, x: i32, y: i32, cost: Cost) -> bool {
        let Some(idx) = self.state.region.index_of(x, y) else {
            return false;
        };
        self.state_mut().costs[idx] = cost;
        true
    }

    /// Copy-on-write access: detaches from any outstanding snapshot first.
    pub(crate) fn state_mut(&mut self) -> &mut GridState {
        Arc::make_mut(&mut self.state)
    }
}
