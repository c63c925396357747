use std::collections::VecDeque;

use super::{CostMapInflator, InflatorSettings, inflated_cost};
use crate::grid::GridCostMap;
use crate::types::{Cost, Result, is_obstacle};

/// Accelerated inflator.
///
/// The maximum over a clamped square window equals the maximum over its
/// rows of each row's maximum, so one sliding-window pass along every row
/// followed by one along every column gives every cell its window maximum in
/// time independent of the radius.
#[derive(Debug, Clone)]
pub struct SeparableCostMapInflator {
    settings: InflatorSettings,
}

impl SeparableCostMapInflator {
    pub fn new(settings: InflatorSettings) -> Self {
        Self { settings }
    }
}

/// Maximum of `input[i - r ..= i + r]` (clamped) for every `i`, written to `out`.
fn sliding_max(input: &[Cost], r: usize, out: &mut [Cost], window: &mut VecDeque<usize>) {
    let n = input.len();
    window.clear();
    let mut next = 0;
    for i in 0..n {
        let hi = (i + r).min(n - 1);
        while next <= hi {
            while window.back().is_some_and(|&b| input[b] <= input[next]) {
                window.pop_back();
            }
            window.push_back(next);
            next += 1;
        }
        let lo = i.saturating_sub(r);
        while window.front().is_some_and(|&f| f < lo) {
            window.pop_front();
        }
        if let Some(&f) = window.front() {
            out[i] = input[f];
        }
    }
}

impl CostMapInflator for SeparableCostMapInflator {
    fn settings(&self) -> &InflatorSettings {
        &self.settings
    }

    fn inflate_cells(&self, grid: &GridCostMap, radius_cells: u32) -> Result<Vec<Cost>> {
        let width = grid.width() as usize;
        let height = grid.height() as usize;
        let costs = grid.costs();
        if costs.is_empty() {
            return Ok(Vec::new());
        }
        let r = radius_cells.min(grid.width().max(grid.height())) as usize;
        let mut window = VecDeque::with_capacity((2 * r + 1).min(width.max(height)));

        let mut row_max = vec![0; costs.len()];
        for (src, dst) in costs.chunks_exact(width).zip(row_max.chunks_exact_mut(width)) {
            sliding_max(src, r, dst, &mut window);
        }

        let mut block_max = vec![0; costs.len()];
        let mut column = vec![0; height];
        let mut column_out = vec![0; height];
        for x in 0..width {
            for (y, c) in column.iter_mut().enumerate() {
                *c = row_max[y * width + x];
            }
            sliding_max(&column, r, &mut column_out, &mut window);
            for (y, c) in column_out.iter().enumerate() {
                block_max[y * width + x] = *c;
            }
        }

        Ok(costs
            .iter()
            .zip(&block_max)
            .map(|(&cost, &highest)| {
                if is_obstacle(cost) {
                    cost
                } else {
                    inflated_cost(highest)
                }
            })
            .collect())
    }
}
