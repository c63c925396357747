pub mod constants;
pub mod error;
pub mod geometry;
pub mod pose;
pub mod source;

pub use constants::*;
pub use error::{CostMapError, Result};
pub use geometry::{Bounds, CellRegion};
pub use pose::CostMapPose;
pub use source::CostMapSource;
