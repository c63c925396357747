use std::path::Path;

use image::{GrayImage, Luma};

use crate::costmap::CostMap;
use crate::types::{Cost, MAX_COST, MIN_COST, Result};

/// Render a cost map as a grayscale preview.
///
/// - [`MIN_COST`] becomes white.
/// - [`MAX_COST`] (obstacle) becomes black.
/// - Costs in between shade linearly.
///
/// Row `lower_y_limit` is written to the **bottom** of the image so the
/// picture matches the map's world frame. An invalid map gives a 0x0 image.
pub fn cost_map_to_image(map: &dyn CostMap) -> GrayImage {
    let grid = map.snapshot();
    let region = grid.region();
    if !grid.is_valid() || region.is_empty() {
        return GrayImage::new(0, 0);
    }

    let width = region.width();
    let height = region.height();
    let mut img = GrayImage::new(width, height);
    for (row, costs) in grid.costs().chunks_exact(width as usize).enumerate() {
        let y_img = height - 1 - row as u32;
        for (x, &cost) in costs.iter().enumerate() {
            img.put_pixel(x as u32, y_img, Luma([cost_to_gray(cost)]));
        }
    }

    img
}

/// Write [`cost_map_to_image`] to a PNG file.
pub fn save_cost_map_png(map: &dyn CostMap, path: impl AsRef<Path>) -> Result<()> {
    cost_map_to_image(map).save(path)?;
    Ok(())
}

fn cost_to_gray(cost: Cost) -> u8 {
    let v = (cost as i32).clamp(MIN_COST as i32, MAX_COST as i32);
    // 0 (free) -> 255, 127 (obstacle) -> 0
    (255 - (v * 255) / MAX_COST as i32) as u8
}
