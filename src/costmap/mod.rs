//! The read contract shared by every cost map, and the producers that
//! maintain one.
//!
//! All producers store their cells in a [`GridCostMap`]; they differ only in
//! how they build and update it. [`ProducerCostMap`] is the closed set of
//! producer kinds a coordinator can hold side by side.

pub mod fixed;
pub mod floorplan;
pub mod geometry;
pub mod prior_trajectory;

pub use fixed::FixedGridCostMap;
pub use floorplan::{FloorplanCostMap, FloorplanLayer, FloorplanPolygon};
pub use geometry::{Geometry, GeometryCostMap};
pub use prior_trajectory::PriorTrajectoryCostMap;

use glam::Vec2;

use crate::grid::GridCostMap;
use crate::types::{CellRegion, Cost, CostMapPose, CostMapSource};

pub use crate::types::is_obstacle;

/// Read access to a cost map.
///
/// Everything is answered from the backing grid; implementors only say which
/// grid that is. Reads outside the map's window return
/// [`MAX_COST`](crate::types::MAX_COST) and never fail.
pub trait CostMap {
    fn grid(&self) -> &GridCostMap;

    fn source(&self) -> CostMapSource {
        self.grid().source()
    }

    /// Meters per cell; fixed for the lifetime of the map.
    fn resolution(&self) -> f32 {
        self.grid().resolution()
    }

    /// True only while the map holds usable data.
    fn is_valid(&self) -> bool {
        self.grid().is_valid()
    }

    /// Whether obstacles still need growing by the robot radius before planning.
    fn requires_inflation(&self) -> bool {
        self.grid().requires_inflation()
    }

    fn region(&self) -> CellRegion {
        self.grid().region()
    }

    fn lower_x_limit(&self) -> i32 {
        self.region().min.x
    }

    fn upper_x_limit(&self) -> i32 {
        self.region().max.x
    }

    fn lower_y_limit(&self) -> i32 {
        self.region().min.y
    }

    fn upper_y_limit(&self) -> i32 {
        self.region().max.y
    }

    fn cost(&self, x: i32, y: i32) -> Cost {
        self.grid().cost(x, y)
    }

    fn cost_at_position(&self, position: Vec2) -> Cost {
        self.grid().cost_at_position(position)
    }

    fn all_poses(&self) -> Vec<CostMapPose> {
        self.grid().all_poses()
    }

    /// Consistent copy of window and buffer, safe to hold across updates.
    fn snapshot(&self) -> GridCostMap {
        self.grid().snapshot()
    }
}

impl CostMap for GridCostMap {
    fn grid(&self) -> &GridCostMap {
        self
    }
}

/// Any of the producer kinds, for coordinators that hold them together.
#[derive(Debug, Clone)]
pub enum ProducerCostMap {
    Fixed(FixedGridCostMap),
    Geometry(GeometryCostMap),
    Floorplan(FloorplanCostMap),
    PriorTrajectory(PriorTrajectoryCostMap),
}

impl CostMap for ProducerCostMap {
    fn grid(&self) -> &GridCostMap {
        match self {
            Self::Fixed(map) => map.grid(),
            Self::Geometry(map) => map.grid(),
            Self::Floorplan(map) => map.grid(),
            Self::PriorTrajectory(map) => map.grid(),
        }
    }
}

impl From<FixedGridCostMap> for ProducerCostMap {
    fn from(map: FixedGridCostMap) -> Self {
        Self::Fixed(map)
    }
}

impl From<GeometryCostMap> for ProducerCostMap {
    fn from(map: GeometryCostMap) -> Self {
        Self::Geometry(map)
    }
}

impl From<FloorplanCostMap> for ProducerCostMap {
    fn from(map: FloorplanCostMap) -> Self {
        Self::Floorplan(map)
    }
}

impl From<PriorTrajectoryCostMap> for ProducerCostMap {
    fn from(map: PriorTrajectoryCostMap) -> Self {
        Self::PriorTrajectory(map)
    }
}

/// The valid maps out of a collection, as trait objects ready for fusion.
pub fn valid_cost_maps<M: CostMap>(maps: &[M]) -> Vec<&dyn CostMap> {
    maps.iter()
        .filter(|m| m.is_valid())
        .map(|m| m as &dyn CostMap)
        .collect()
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::types::{MAX_COST, OBSTACLE_COST};

    #[test]
    fn limits_follow_region() {
        let region = CellRegion::new(IVec2::new(-1, 2), IVec2::new(3, 4));
        let fixed = FixedGridCostMap::new(
            CostMapSource::VolumetricMap,
            0.1,
            region,
            vec![0; region.area()],
        )
        .unwrap();
        let map = ProducerCostMap::from(fixed);

        assert_eq!(map.lower_x_limit(), -1);
        assert_eq!(map.upper_x_limit(), 3);
        assert_eq!(map.lower_y_limit(), 2);
        assert_eq!(map.upper_y_limit(), 4);
        assert_eq!(map.all_poses().len(), 8);
        assert_eq!(map.cost(5, 5), MAX_COST);
        assert!(is_obstacle(map.cost(5, 5)));
        assert!(!is_obstacle(map.cost(0, 2)));
        assert_eq!(map.source(), CostMapSource::VolumetricMap);
    }

    #[test]
    fn valid_cost_maps_skips_invalid() {
        let geometry = GeometryCostMap::new(CostMapSource::Bumper, 0.1, 0.2).unwrap();
        let fixed = FixedGridCostMap::new(
            CostMapSource::VolumetricMap,
            0.1,
            CellRegion::new(IVec2::ZERO, IVec2::ONE),
            vec![OBSTACLE_COST],
        )
        .unwrap();
        let maps = vec![ProducerCostMap::from(geometry), ProducerCostMap::from(fixed)];

        let valid = valid_cost_maps(&maps);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].source(), CostMapSource::VolumetricMap);
    }
}
