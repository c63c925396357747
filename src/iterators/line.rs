use glam::{IVec2, Vec2};

/// Tolerance (in units of the line parameter) under which both axes are
/// considered to cross a cell boundary at the same point.
const CORNER_EPSILON: f32 = 1e-6;

/// Supercover traversal of the infinite grid: yields every cell the segment
/// passes through, including both side cells when it crosses a cell corner.
///
/// End points are in world coordinates (meters). Cells are emitted in order
/// from the start cell to the end cell; the walk is not clipped to any grid.
pub struct SupercoverLine {
    /// Normalised step direction along each axis.
    step: IVec2,
    t_max: Vec2,
    /// Distance to the next cell boundary along each axis.
    t_delta: Vec2,
    /// Current cell being processed.
    cell: IVec2,
    end: IVec2,
    /// Cells queued by a corner crossing.
    pending: [Option<IVec2>; 3],
    emit_start: bool,
    done: bool,
}

impl SupercoverLine {
    pub fn new(start: Vec2, end: Vec2, resolution: f32) -> Self {
        let start = start / resolution;
        let end = end / resolution;
        let dir = end - start;

        let step = IVec2::new(signum(dir.x), signum(dir.y));
        let (t_delta_x, t_max_x) = axis_params(start.x, dir.x);
        let (t_delta_y, t_max_y) = axis_params(start.y, dir.y);

        Self {
            step,
            t_max: Vec2::new(t_max_x, t_max_y),
            t_delta: Vec2::new(t_delta_x, t_delta_y),
            cell: start.floor().as_ivec2(),
            end: end.floor().as_ivec2(),
            pending: [None; 3],
            emit_start: true,
            done: false,
        }
    }

    fn pop_pending(&mut self) -> Option<IVec2> {
        self.pending.iter_mut().find_map(Option::take)
    }

    fn advance(&mut self) {
        let move_x = self.cell.x != self.end.x && self.step.x != 0;
        let move_y = self.cell.y != self.end.y && self.step.y != 0;

        if move_x && move_y && (self.t_max.x - self.t_max.y).abs() <= CORNER_EPSILON {
            let side_x = IVec2::new(self.cell.x + self.step.x, self.cell.y);
            let side_y = IVec2::new(self.cell.x, self.cell.y + self.step.y);
            self.cell += self.step;
            self.t_max += self.t_delta;
            self.pending = [Some(side_x), Some(side_y), Some(self.cell)];
            return;
        }

        if move_x && (!move_y || self.t_max.x < self.t_max.y) {
            self.t_max.x += self.t_delta.x;
            self.cell.x += self.step.x;
        } else {
            self.t_max.y += self.t_delta.y;
            self.cell.y += self.step.y;
        }
        self.pending[0] = Some(self.cell);
    }
}

impl Iterator for SupercoverLine {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emit_start {
            self.emit_start = false;
            return Some(self.cell);
        }

        if let Some(cell) = self.pop_pending() {
            return Some(cell);
        }

        let stalled = (self.cell.x == self.end.x || self.step.x == 0)
            && (self.cell.y == self.end.y || self.step.y == 0);
        if self.done || stalled {
            self.done = true;
            return None;
        }

        self.advance();
        self.pop_pending()
    }
}

fn signum(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

fn axis_params(start: f32, dir: f32) -> (f32, f32) {
    if dir == 0.0 {
        return (f32::INFINITY, f32::INFINITY);
    }

    // `fract` keeps the sign, so measure from the floor instead.
    let offset = start - start.floor();
    let dist_to_boundary = if dir > 0.0 { 1.0 - offset } else { offset };

    let t_delta = (1.0 / dir).abs();
    let t_max = dist_to_boundary * t_delta;
    (t_delta, t_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(start: Vec2, end: Vec2) -> Vec<IVec2> {
        SupercoverLine::new(start, end, 1.0).collect()
    }

    #[test]
    fn single_cell_segment() {
        let c = cells(Vec2::new(0.2, 0.2), Vec2::new(0.8, 0.7));
        assert_eq!(c, vec![IVec2::ZERO]);
    }

    #[test]
    fn horizontal_line() {
        let c = cells(Vec2::new(0.5, 1.5), Vec2::new(3.5, 1.5));
        assert_eq!(
            c,
            vec![
                IVec2::new(0, 1),
                IVec2::new(1, 1),
                IVec2::new(2, 1),
                IVec2::new(3, 1)
            ]
        );
    }

    #[test]
    fn negative_direction_and_coordinates() {
        let c = cells(Vec2::new(-0.5, 0.5), Vec2::new(-3.5, 0.5));
        assert_eq!(
            c,
            vec![
                IVec2::new(-1, 0),
                IVec2::new(-2, 0),
                IVec2::new(-3, 0),
                IVec2::new(-4, 0)
            ]
        );
    }

    #[test]
    fn diagonal_includes_corner_neighbours() {
        let c = cells(Vec2::new(0.5, 0.5), Vec2::new(2.5, 2.5));
        assert_eq!(
            c,
            vec![
                IVec2::new(0, 0),
                IVec2::new(1, 0),
                IVec2::new(0, 1),
                IVec2::new(1, 1),
                IVec2::new(2, 1),
                IVec2::new(1, 2),
                IVec2::new(2, 2),
            ]
        );
    }

    #[test]
    fn shallow_line_is_connected() {
        let c = cells(Vec2::new(0.5, 0.5), Vec2::new(6.5, 2.2));
        assert_eq!(c.first(), Some(&IVec2::new(0, 0)));
        assert_eq!(c.last(), Some(&IVec2::new(6, 2)));
        for pair in c.windows(2) {
            let d = (pair[1] - pair[0]).abs();
            assert_eq!(d.x + d.y, 1, "cells {:?} are not 4-connected", pair);
        }
    }

    #[test]
    fn respects_resolution() {
        let c: Vec<IVec2> =
            SupercoverLine::new(Vec2::new(0.05, 0.05), Vec2::new(0.35, 0.05), 0.1).collect();
        assert_eq!(c.len(), 4);
        assert_eq!(c.last(), Some(&IVec2::new(3, 0)));
    }
}
