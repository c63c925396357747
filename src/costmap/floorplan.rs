use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::CostMap;
use crate::grid::GridCostMap;
use crate::types::geometry::polygon_area;
use crate::types::{Bounds, CostMapSource, MIN_COST, Result};

/// What a floor plan polygon represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorplanLayer {
    Wall,
    Furniture,
    Other,
}

/// A labeled polygon from the floor plan, vertices in world meters.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorplanPolygon {
    pub layer: FloorplanLayer,
    pub vertices: Vec<Vec2>,
}

impl FloorplanPolygon {
    pub fn new(layer: FloorplanLayer, vertices: Vec<Vec2>) -> Self {
        Self { layer, vertices }
    }

    /// Enclosed area in square meters, regardless of winding.
    pub fn area(&self) -> f32 {
        polygon_area(&self.vertices).abs()
    }

    fn is_usable(&self, min_area: f32) -> bool {
        self.vertices.len() >= 2 && self.area() >= min_area
    }
}

/// Static walls and furniture, built once from a floor plan.
#[derive(Debug, Clone)]
pub struct FloorplanCostMap {
    grid: GridCostMap,
    polygons: Vec<FloorplanPolygon>,
}

impl FloorplanCostMap {
    /// Build the map from `polygons`.
    ///
    /// Polygons with fewer than two vertices or an area below `min_area` are
    /// discarded. The grid covers the union of the remaining vertices and each
    /// outline is drawn as obstacle; with nothing left the map is invalid.
    pub fn new(resolution: f32, polygons: Vec<FloorplanPolygon>, min_area: f32) -> Result<Self> {
        let mut grid = GridCostMap::new(CostMapSource::FloorPlan, resolution, true)?;

        let received = polygons.len();
        let polygons: Vec<FloorplanPolygon> = polygons
            .into_iter()
            .filter(|p| p.is_usable(min_area))
            .collect();
        if polygons.len() < received {
            warn!(
                discarded = received - polygons.len(),
                min_area, "discarding unusable floor plan polygons"
            );
        }

        if let Some(bounds) = Bounds::from_points(polygons.iter().flat_map(|p| p.vertices.iter())) {
            grid.make_grid(&bounds, MIN_COST)?;
            for polygon in &polygons {
                grid.draw_polygon_on_grid(&polygon.vertices);
            }
            debug!(
                polygons = polygons.len(),
                width = grid.width(),
                height = grid.height(),
                "floor plan map built"
            );
        }

        Ok(Self { grid, polygons })
    }

    /// Polygons that made it into the grid.
    pub fn polygons(&self) -> &[FloorplanPolygon] {
        &self.polygons
    }
}

impl CostMap for FloorplanCostMap {
    fn grid(&self) -> &GridCostMap {
        &self.grid
    }
}
