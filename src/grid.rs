//! Free-cell enumeration and uniform selection over a square grid.

use std::collections::HashSet;

use crate::random::RandomSource;
use crate::snake::{Position, Snake};

/// Cells that new placements must avoid.
pub type Occupied = HashSet<Position>;

/// Builds the occupied set from the snake, the obstacles and optional food.
#[must_use]
pub fn occupied_cells(snake: &Snake, obstacles: &[Position], food: Option<Position>) -> Occupied {
    snake
        .segments()
        .copied()
        .chain(obstacles.iter().copied())
        .chain(food)
        .collect()
}

/// Lists every cell not in `occupied`, row-major (y outer, x inner).
#[must_use]
pub fn free_cells(grid_size: u16, occupied: &Occupied) -> Vec<Position> {
    let size = i32::from(grid_size);
    let mut candidates = Vec::with_capacity(
        (usize::from(grid_size) * usize::from(grid_size)).saturating_sub(occupied.len()),
    );

    for y in 0..size {
        for x in 0..size {
            let position = Position { x, y };
            if !occupied.contains(&position) {
                candidates.push(position);
            }
        }
    }

    candidates
}

/// Picks one free cell uniformly, or `None` when the grid is full.
///
/// Consumes exactly one random value when a free cell exists and none
/// otherwise.
pub fn pick_free_cell<R: RandomSource + ?Sized>(
    grid_size: u16,
    occupied: &Occupied,
    random: &mut R,
) -> Option<Position> {
    let candidates = free_cells(grid_size, occupied);
    if candidates.is_empty() {
        return None;
    }

    let index = random.next_index(candidates.len());
    Some(candidates[index])
}
