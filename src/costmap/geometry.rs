use std::time::Instant;

use glam::Vec2;
use tracing::debug;

use super::CostMap;
use crate::grid::GridCostMap;
use crate::types::error::invalid_argument;
use crate::types::{Bounds, Cost, CostMapSource, MIN_COST, OBSTACLE_COST, Result};

/// A transient polygon reported by a sensor, e.g. a vision detection or a
/// bumper contact.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Vertices in world coordinates (meters), implicitly closed.
    pub polygon: Vec<Vec2>,
    pub cost: Cost,
    /// The geometry is dropped by any update whose timestamp is past this.
    pub expiry: Instant,
}

impl Geometry {
    /// Obstacle polygon that lives until `expiry`.
    pub fn new(polygon: Vec<Vec2>, expiry: Instant) -> Self {
        Self {
            polygon,
            cost: OBSTACLE_COST,
            expiry,
        }
    }

    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = cost;
        self
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expiry < now
    }
}

/// Cost map rebuilt from the live set of expiring geometries.
#[derive(Debug, Clone)]
pub struct GeometryCostMap {
    grid: GridCostMap,
    robot_radius: f32,
    geometries: Vec<Geometry>,
}

impl GeometryCostMap {
    pub fn new(source: CostMapSource, resolution: f32, robot_radius: f32) -> Result<Self> {
        if !(robot_radius.is_finite() && robot_radius >= 0.0) {
            return Err(invalid_argument(format!(
                "robot radius must be non-negative, got {robot_radius}"
            )));
        }
        Ok(Self {
            grid: GridCostMap::new(source, resolution, true)?,
            robot_radius,
            geometries: Vec::new(),
        })
    }

    /// Geometries currently drawn into the grid.
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn robot_radius(&self) -> f32 {
        self.robot_radius
    }

    /// Replace the live set with the unexpired part of `geometries` and
    /// rebuild the grid around them.
    ///
    /// The grid covers the union of all vertices padded by the robot radius,
    /// starts at [`MIN_COST`] and gets each polygon outline drawn with that
    /// geometry's cost. No live geometry leaves the map invalid.
    pub fn update(&mut self, now: Instant, geometries: Vec<Geometry>) -> Result<()> {
        let received = geometries.len();
        let live: Vec<Geometry> = geometries
            .into_iter()
            .filter(|g| !g.is_expired(now))
            .collect();
        if live.len() < received {
            debug!(
                source = %self.grid.source(),
                expired = received - live.len(),
                "dropping expired geometries"
            );
        }

        let Some(mut bounds) = Bounds::from_points(live.iter().flat_map(|g| g.polygon.iter()))
        else {
            self.geometries = live;
            self.grid.invalidate();
            debug!(source = %self.grid.source(), "no live geometry, map invalid");
            return Ok(());
        };
        bounds.expand_by(self.robot_radius);

        let mut grid = self.grid.clone();
        grid.make_grid(&bounds, MIN_COST)?;
        for geometry in &live {
            grid.draw_polygon_on_grid_with_cost(&geometry.polygon, geometry.cost);
        }

        debug!(
            source = %grid.source(),
            geometries = live.len(),
            width = grid.width(),
            height = grid.height(),
            "geometry map rebuilt"
        );
        self.grid = grid;
        self.geometries = live;
        Ok(())
    }

    /// Drop every geometry; the map becomes invalid.
    pub fn clear(&mut self, now: Instant) -> Result<()> {
        self.update(now, Vec::new())
    }
}

impl CostMap for GeometryCostMap {
    fn grid(&self) -> &GridCostMap {
        &self.grid
    }
}
