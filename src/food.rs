use serde::{Deserialize, Serialize};

use crate::grid::{occupied_cells, pick_free_cell};
use crate::random::RandomSource;
use crate::snake::{Position, Snake};

/// Cosmetic fruit variety; alternates on every meal when enabled.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FoodKind {
    #[default]
    Apple,
    Orange,
}

impl FoodKind {
    /// Returns the other fruit.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Apple => Self::Orange,
            Self::Orange => Self::Apple,
        }
    }
}

/// Places food on a free cell avoiding the snake and `obstacles`.
///
/// Returns `None` when the grid has no free cell left.
pub fn place_food<R: RandomSource + ?Sized>(
    grid_size: u16,
    snake: &Snake,
    obstacles: &[Position],
    random: &mut R,
) -> Option<Position> {
    let occupied = occupied_cells(snake, obstacles, None);
    pick_free_cell(grid_size, &occupied, random)
}

/// Places food on a free cell avoiding only the snake.
pub fn place_food_simple<R: RandomSource + ?Sized>(
    grid_size: u16,
    snake: &Snake,
    random: &mut R,
) -> Option<Position> {
    place_food(grid_size, snake, &[], random)
}
