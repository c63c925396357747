use std::fmt;

use serde::{Deserialize, Serialize};

/// Origin of the data held by a cost map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMapSource {
    FloorPlan,
    VolumetricMap,
    ComputerVision,
    PriorTrajectory,
    Bumper,
    /// Fusion output inflated by the full robot radius.
    FullyInflated,
    /// Fusion output inflated by a fraction of the robot radius.
    ProportionallyInflated,
}

impl CostMapSource {
    /// True for the two outputs produced by the inflation step.
    pub fn is_inflated_output(&self) -> bool {
        matches!(self, Self::FullyInflated | Self::ProportionallyInflated)
    }
}

impl fmt::Display for CostMapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FloorPlan => "floor_plan",
            Self::VolumetricMap => "volumetric_map",
            Self::ComputerVision => "computer_vision",
            Self::PriorTrajectory => "prior_trajectory",
            Self::Bumper => "bumper",
            Self::FullyInflated => "fully_inflated",
            Self::ProportionallyInflated => "proportionally_inflated",
        };
        f.write_str(name)
    }
}
