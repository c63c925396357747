pub mod config;
pub mod costmap;
pub mod fusion;
pub mod grid;
pub mod inflation;
pub mod iterators;
pub mod pipeline;
pub mod shared;
pub mod types;
pub mod visualization;

pub use config::CostMapConfig;
pub use costmap::{
    CostMap, FixedGridCostMap, FloorplanCostMap, Geometry, GeometryCostMap, PriorTrajectoryCostMap,
    ProducerCostMap,
};
pub use fusion::{CostMapFuser, TrivialCostMapFuser};
pub use grid::GridCostMap;
pub use inflation::{CostMapInflator, InflatorKind, InflatorSettings};
pub use pipeline::{FusionPipeline, InflatedCostMaps};
pub use shared::SharedCostMap;
pub use types::{CostMapError, CostMapPose, CostMapSource, Result};
