use std::fmt;

use glam::{IVec2, Vec2};

/// Discrete grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CostMapPose {
    pub x: i32,
    pub y: i32,
}

impl CostMapPose {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Pose shifted by `(dx, dy)` cells.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance in cells.
    pub fn distance(&self, other: &CostMapPose) -> f32 {
        self.as_ivec2().as_vec2().distance(other.as_ivec2().as_vec2())
    }

    /// Squared Euclidean distance in cells.
    pub fn distance_squared(&self, other: &CostMapPose) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// World position of the cell center. The inverse bucketing is the plain
    /// floor used by [`crate::grid::discretize`].
    pub fn to_world(&self, resolution: f32) -> Vec2 {
        (self.as_ivec2().as_vec2() + Vec2::splat(0.5)) * resolution
    }

    pub fn as_ivec2(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

impl From<IVec2> for CostMapPose {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl fmt::Display for CostMapPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
