//! Cost map configuration loaded from YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::fusion::TrivialCostMapFuser;
use crate::inflation::{CostMapInflator, InflatorKind, InflatorSettings};
use crate::pipeline::FusionPipeline;
use crate::types::error::invalid_argument;
use crate::types::Result;

fn default_resolution() -> f32 {
    0.05
}

fn default_robot_radius() -> f32 {
    0.2
}

fn default_radius_factor() -> f32 {
    0.5
}

fn default_path_growing_radius() -> f32 {
    0.4
}

fn default_padding() -> f32 {
    1.0
}

/// Floor plan settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FloorplanSection {
    /// Polygons enclosing less than this many square meters are discarded.
    #[serde(default)]
    pub min_polygon_area: f32,
}

/// Prior trajectory settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorTrajectorySection {
    /// Radius (meters) of the discounted corridor around the path.
    #[serde(default = "default_path_growing_radius")]
    pub path_growing_radius: f32,
    /// Extra margin (meters) around the corridor.
    #[serde(default = "default_padding")]
    pub padding: f32,
}

impl Default for PriorTrajectorySection {
    fn default() -> Self {
        Self {
            path_growing_radius: default_path_growing_radius(),
            padding: default_padding(),
        }
    }
}

/// Full cost map configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostMapConfig {
    /// Meters per cell shared by every map.
    #[serde(default = "default_resolution")]
    pub resolution: f32,
    /// Robot footprint radius (meters).
    #[serde(default = "default_robot_radius")]
    pub robot_radius: f32,
    /// Fraction of the robot radius used for the partial inflation.
    #[serde(default = "default_radius_factor")]
    pub radius_factor: f32,
    #[serde(default)]
    pub inflator: InflatorKind,
    #[serde(default)]
    pub floorplan: FloorplanSection,
    #[serde(default)]
    pub prior_trajectory: PriorTrajectorySection,
}

impl Default for CostMapConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            robot_radius: default_robot_radius(),
            radius_factor: default_radius_factor(),
            inflator: InflatorKind::default(),
            floorplan: FloorplanSection::default(),
            prior_trajectory: PriorTrajectorySection::default(),
        }
    }
}

impl CostMapConfig {
    /// Load and validate configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.inflator_settings()?;
        if self.floorplan.min_polygon_area < 0.0 {
            return Err(invalid_argument("floorplan.min_polygon_area must be non-negative"));
        }
        let trajectory = &self.prior_trajectory;
        if trajectory.path_growing_radius < 0.0 || trajectory.padding < 0.0 {
            return Err(invalid_argument(
                "prior_trajectory radius and padding must be non-negative",
            ));
        }
        Ok(())
    }

    pub fn inflator_settings(&self) -> Result<InflatorSettings> {
        InflatorSettings::new(self.resolution, self.robot_radius, self.radius_factor)
    }

    /// The inflation strategy named by `inflator`.
    pub fn build_inflator(&self) -> Result<Box<dyn CostMapInflator>> {
        Ok(self.inflator_settings()?.build(self.inflator))
    }

    pub fn fusion_pipeline(&self) -> Result<FusionPipeline> {
        Ok(FusionPipeline::new(
            Box::new(TrivialCostMapFuser::new()),
            self.build_inflator()?,
        ))
    }
}
