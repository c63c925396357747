use glam::{IVec2, Vec2};

use super::line::SupercoverLine;

/// Iterator over the cells on the boundary of a closed polygon.
///
/// Points are expected in world coordinates (meters). The vertex list is
/// implicitly closed (edge `i` runs to vertex `(i + 1) % n`), and each edge
/// is walked with [`SupercoverLine`]. Shared vertices are emitted once per
/// edge that touches them; the interior is never visited.
pub struct PolygonOutline<'a> {
    points: &'a [Vec2],
    resolution: f32,
    edge: usize,
    edges: usize,
    line: Option<SupercoverLine>,
}

impl<'a> PolygonOutline<'a> {
    pub fn new(points: &'a [Vec2], resolution: f32) -> Self {
        // A two-vertex polygon is a single segment; closing it would walk it twice.
        let edges = match points.len() {
            0 => 0,
            1 | 2 => 1,
            n => n,
        };
        Self {
            points,
            resolution,
            edge: 0,
            edges,
            line: None,
        }
    }

    fn next_edge(&mut self) -> Option<SupercoverLine> {
        if self.edge >= self.edges {
            return None;
        }
        let n = self.points.len();
        let start = self.points[self.edge];
        let end = self.points[(self.edge + 1) % n];
        self.edge += 1;
        Some(SupercoverLine::new(start, end, self.resolution))
    }
}

impl Iterator for PolygonOutline<'_> {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(cell) = self.line.as_mut().and_then(Iterator::next) {
                return Some(cell);
            }
            self.line = Some(self.next_edge()?);
        }
    }
}
