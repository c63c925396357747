//! Growing obstacles by the robot footprint.
//!
//! Every non-obstacle cell takes the highest cost found in the square window
//! of `ceil(radius / resolution)` cells around it, clamped to the grid's own
//! window, then saturated by [`inflated_cost`]. Obstacle cells are left as
//! they are.
//!
//! The window is square on purpose, unlike the circular mask of
//! [`GridCostMap::inflate_cost`](crate::grid::GridCostMap::inflate_cost).
//!
//! Two strategies implement the same arithmetic: [`SimpleCostMapInflator`]
//! scans each window, [`SeparableCostMapInflator`] runs a row pass and a
//! column pass of sliding-window maxima. Their outputs are identical.

mod separable;
mod simple;

pub use separable::SeparableCostMapInflator;
pub use simple::SimpleCostMapInflator;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::costmap::{CostMap, FixedGridCostMap};
use crate::grid::GridCostMap;
use crate::types::error::invalid_argument;
use crate::types::{Cost, CostMapSource, INSCRIBED_INFLATED_OBSTACLE, MAX_COST, Result};

/// Convert an inflation radius in world units (meters) to a cell count.
///
/// Returns `ceil(radius / resolution)`. If resolution is zero or negative, or
/// if the result would be non-positive, returns 0.
#[inline]
pub fn inflation_radius_to_cells(radius_m: f32, resolution: f32) -> u32 {
    if resolution <= 0.0 || radius_m <= 0.0 {
        return 0;
    }
    (radius_m / resolution).ceil() as u32
}

/// Cost a non-obstacle cell takes given the highest cost around it.
///
/// Obstacles propagate unchanged; anything at or above
/// [`INSCRIBED_INFLATED_OBSTACLE`] saturates there.
#[inline]
pub fn inflated_cost(neighbour_max: Cost) -> Cost {
    if neighbour_max == MAX_COST {
        MAX_COST
    } else if neighbour_max >= INSCRIBED_INFLATED_OBSTACLE {
        INSCRIBED_INFLATED_OBSTACLE
    } else {
        neighbour_max
    }
}

/// Which inflation strategy to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InflatorKind {
    /// Per-cell window scan.
    #[default]
    Simple,
    /// Row/column sliding-window maxima.
    Separable,
}

/// Parameters shared by all inflators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflatorSettings {
    /// Meters per cell of the maps this inflator accepts.
    pub resolution: f32,
    /// Robot radius in meters.
    pub robot_radius: f32,
    /// Fraction of the robot radius used for partial inflation.
    pub radius_factor: f32,
}

impl InflatorSettings {
    pub fn new(resolution: f32, robot_radius: f32, radius_factor: f32) -> Result<Self> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(invalid_argument(format!(
                "resolution must be positive, got {resolution}"
            )));
        }
        if !(robot_radius.is_finite() && robot_radius >= 0.0) {
            return Err(invalid_argument(format!(
                "robot radius must be non-negative, got {robot_radius}"
            )));
        }
        if !(radius_factor > 0.0 && radius_factor <= 1.0) {
            return Err(invalid_argument(format!(
                "radius factor must be in (0, 1], got {radius_factor}"
            )));
        }
        Ok(Self {
            resolution,
            robot_radius,
            radius_factor,
        })
    }

    pub fn factor_radius(&self) -> f32 {
        self.robot_radius * self.radius_factor
    }

    pub fn build(self, kind: InflatorKind) -> Box<dyn CostMapInflator> {
        match kind {
            InflatorKind::Simple => Box::new(SimpleCostMapInflator::new(self)),
            InflatorKind::Separable => Box::new(SeparableCostMapInflator::new(self)),
        }
    }
}

/// Expands obstacle influence by the robot footprint.
pub trait CostMapInflator: Send + Sync {
    fn settings(&self) -> &InflatorSettings;

    /// Inflate a grid's buffer with a window of `radius_cells` in every
    /// direction. The result is row-major over the grid's window.
    fn inflate_cells(&self, grid: &GridCostMap, radius_cells: u32) -> Result<Vec<Cost>>;

    /// Inflate `map` by `radius` meters into a new map tagged `output_source`.
    ///
    /// The map's resolution must match the configured one. An invalid map
    /// yields an invalid output.
    fn inflate(
        &self,
        map: &dyn CostMap,
        radius: f32,
        output_source: CostMapSource,
    ) -> Result<FixedGridCostMap> {
        let settings = self.settings();
        let grid = map.snapshot();
        if (grid.resolution() - settings.resolution).abs() > f32::EPSILON * settings.resolution {
            return Err(invalid_argument(format!(
                "map resolution {} does not match inflator resolution {}",
                grid.resolution(),
                settings.resolution
            )));
        }
        if !grid.is_valid() {
            return FixedGridCostMap::invalid(output_source, settings.resolution, false);
        }

        let radius_cells = inflation_radius_to_cells(radius, settings.resolution);
        let costs = self.inflate_cells(&grid, radius_cells)?;
        debug!(
            source = %grid.source(),
            output = %output_source,
            radius_cells,
            width = grid.width(),
            height = grid.height(),
            "inflated cost map"
        );
        FixedGridCostMap::already_inflated(output_source, settings.resolution, grid.region(), costs)
    }

    /// Inflate by the full robot radius.
    fn inflate_cost_map_full_radius(&self, map: &dyn CostMap) -> Result<FixedGridCostMap> {
        self.inflate(map, self.settings().robot_radius, CostMapSource::FullyInflated)
    }

    /// Inflate by the robot radius scaled by the radius factor.
    fn inflate_cost_map_factor_radius(&self, map: &dyn CostMap) -> Result<FixedGridCostMap> {
        self.inflate(
            map,
            self.settings().factor_radius(),
            CostMapSource::ProportionallyInflated,
        )
    }
}
