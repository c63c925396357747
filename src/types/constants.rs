/// Traversal cost of a single cell.
pub type Cost = i8;

pub const MIN_COST: Cost = 0;
pub const MAX_COST: Cost = 127;
/// Lethal obstacle. Shares its value with the unknown/out-of-window sentinel.
pub const OBSTACLE_COST: Cost = MAX_COST;

/// Upper bound for summed non-obstacle costs produced by fusion.
pub const MAX_FREE_COST: Cost = 120;
/// Saturation level for cost bled out of obstacles by inflation.
pub const INSCRIBED_INFLATED_OBSTACLE: Cost = 100;

/// Cost off a prior trajectory: traversable but discouraged.
pub const BACKGROUND_COST: Cost = MAX_FREE_COST / 6;
/// Cost near, but not on, a prior trajectory.
pub const MIDDLE_COST: Cost = BACKGROUND_COST / 2;

/// Slack (in cells) so a world maximum lying exactly on a cell boundary still
/// gets a cell of its own.
pub const GRID_EPSILON: f32 = 1e-4;

#[inline]
pub fn is_obstacle(cost: Cost) -> bool {
    cost == MAX_COST
}
