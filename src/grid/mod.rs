pub mod grid_cost_map;
pub mod helpers;
pub mod raster;
pub mod region;

pub use grid_cost_map::{GridCostMap, discretize};
