//! Geometric and spatial types shared by the grid, producer and fusion APIs.

use glam::{IVec2, Vec2};

/// World-axis-aligned rectangle in meters, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Bounds that contain no point yet. Expand it with points to grow it.
    pub fn empty() -> Self {
        Self {
            min: Vec2::new(f32::INFINITY, f32::INFINITY),
            max: Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Smallest bounds containing every point, or `None` for no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec2>) -> Option<Self> {
        let mut bounds = Self::empty();
        for p in points {
            bounds.expand_to_include(*p);
        }
        (!bounds.is_empty()).then_some(bounds)
    }

    /// True until at least one point has been included.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand this bounds to include the point (in place).
    pub fn expand_to_include(&mut self, p: Vec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Expand this bounds to include another one (in place).
    pub fn expand_to_bounds(&mut self, other: &Bounds) {
        if other.is_empty() {
            return;
        }
        self.expand_to_include(other.min);
        self.expand_to_include(other.max);
    }

    /// Expand by a margin in meters in all directions (e.g. for an inflation halo).
    pub fn expand_by(&mut self, margin: f32) {
        self.min -= Vec2::splat(margin);
        self.max += Vec2::splat(margin);
    }
}

/// Window of grid cells. Region is [min.x, max.x) x [min.y, max.y) and may
/// sit anywhere on the infinite signed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRegion {
    pub min: IVec2,
    pub max: IVec2,
}

impl CellRegion {
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// The zero-area window at the grid origin.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y).max(0) as u32
    }

    /// Number of cells inside the window.
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min.x && x < self.max.x && y >= self.min.y && y < self.max.y
    }

    /// Row-major buffer index of a cell, or `None` outside the window.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        let dx = (x - self.min.x) as usize;
        let dy = (y - self.min.y) as usize;
        Some(dy * self.width() as usize + dx)
    }

    /// Smallest window covering both. Empty windows are ignored.
    pub fn union(&self, other: &CellRegion) -> CellRegion {
        match (self.is_empty(), other.is_empty()) {
            (true, _) => *other,
            (_, true) => *self,
            _ => CellRegion::new(self.min.min(other.min), self.max.max(other.max)),
        }
    }

    /// Overlap of both windows; empty when they do not overlap.
    pub fn intersection(&self, other: &CellRegion) -> CellRegion {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.x >= max.x || min.y >= max.y {
            return CellRegion::empty();
        }
        CellRegion::new(min, max)
    }

    /// Every cell in row-major order (y outer, x inner).
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + use<> {
        let CellRegion { min, max } = *self;
        (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| IVec2::new(x, y)))
    }
}

/// Signed area of a closed polygon (shoelace formula). Counter-clockwise
/// vertex order gives a positive area.
pub fn polygon_area(vertices: &[Vec2]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let twice: f32 = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| a.perp_dot(*b))
        .sum();
    0.5 * twice
}
