//! Rectangular queries over a [`GridCostMap`].
//!
//! Region bounds are end-exclusive: `[x_start, x_end) x [y_start, y_end)`.
//! Cells outside the grid's window read as [`MAX_COST`].

use glam::IVec2;

use super::GridCostMap;
use crate::types::error::invalid_argument;
use crate::types::{CellRegion, Cost, MAX_COST, MIN_COST, Result};

fn checked_region(x_start: i32, y_start: i32, x_end: i32, y_end: i32) -> Result<CellRegion> {
    if x_start > x_end || y_start > y_end {
        return Err(invalid_argument(format!(
            "region start ({x_start}, {y_start}) is past its end ({x_end}, {y_end})"
        )));
    }
    Ok(CellRegion::new(
        IVec2::new(x_start, y_start),
        IVec2::new(x_end, y_end),
    ))
}

impl GridCostMap {
    /// Row-major copy (y outer, x inner) of the requested cells.
    ///
    /// Empty for a zero-area region; an error when a start is past its end.
    pub fn cost_region(
        &self,
        x_start: i32,
        y_start: i32,
        x_end: i32,
        y_end: i32,
    ) -> Result<Vec<Cost>> {
        let requested = checked_region(x_start, y_start, x_end, y_end)?;
        let mut out = Vec::with_capacity(requested.area());
        for y in requested.min.y..requested.max.y {
            for x in requested.min.x..requested.max.x {
                out.push(self.cost(x, y));
            }
        }
        Ok(out)
    }

    /// Highest cost among the requested cells.
    ///
    /// [`MIN_COST`] for a zero-area region and [`MAX_COST`] as soon as any
    /// requested cell lies outside the grid.
    pub fn highest_cost_in_region(
        &self,
        x_start: i32,
        y_start: i32,
        x_end: i32,
        y_end: i32,
    ) -> Result<Cost> {
        let requested = checked_region(x_start, y_start, x_end, y_end)?;
        if requested.is_empty() {
            return Ok(MIN_COST);
        }

        let window = self.region();
        if requested.intersection(&window) != requested {
            return Ok(MAX_COST);
        }

        let width = window.width() as usize;
        let x0 = (requested.min.x - window.min.x) as usize;
        let x1 = (requested.max.x - window.min.x) as usize;
        let costs = self.costs();

        let mut highest = MIN_COST;
        for y in requested.min.y..requested.max.y {
            let row = (y - window.min.y) as usize * width;
            let row_max = costs[row + x0..row + x1]
                .iter()
                .copied()
                .max()
                .unwrap_or(MIN_COST);
            if row_max == MAX_COST {
                return Ok(MAX_COST);
            }
            highest = highest.max(row_max);
        }
        Ok(highest)
    }
}
