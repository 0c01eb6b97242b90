//! Obstacle placement: single cells and straight clusters.

use tracing::debug;

use crate::grid::{free_cells, occupied_cells, pick_free_cell};
use crate::input::Direction;
use crate::random::RandomSource;
use crate::snake::{Position, Snake};

/// Places one obstacle cell avoiding the snake, existing obstacles and food.
pub fn place_obstacle<R: RandomSource + ?Sized>(
    grid_size: u16,
    snake: &Snake,
    food: Option<Position>,
    obstacles: &[Position],
    random: &mut R,
) -> Option<Position> {
    let occupied = occupied_cells(snake, obstacles, food);
    pick_free_cell(grid_size, &occupied, random)
}

/// Places a straight run of `size` contiguous free cells.
///
/// Two values are drawn: a rotation into the row-major free-cell list and a
/// rotation into [`Direction::CLOCKWISE`]. Candidates are then scanned
/// deterministically (cells outer, directions inner) and the first run that
/// stays in bounds and touches no occupied cell is returned. Every candidate
/// is checked against the occupied set as it stood before the scan.
///
/// Returns an empty vector when no run fits; no values are drawn when fewer
/// than `size` cells are free.
pub fn place_obstacle_cluster<R: RandomSource + ?Sized>(
    grid_size: u16,
    snake: &Snake,
    food: Option<Position>,
    obstacles: &[Position],
    size: usize,
    random: &mut R,
) -> Vec<Position> {
    let occupied = occupied_cells(snake, obstacles, food);
    let candidates = free_cells(grid_size, &occupied);
    if size == 0 || candidates.len() < size {
        return Vec::new();
    }

    let directions = Direction::CLOCKWISE;
    let start_offset = random.next_index(candidates.len());
    let direction_offset = random.next_index(directions.len());

    for start_idx in 0..candidates.len() {
        let start = candidates[(start_offset + start_idx) % candidates.len()];

        for dir_idx in 0..directions.len() {
            let direction = directions[(direction_offset + dir_idx) % directions.len()];
            let run: Vec<Position> = (0..size)
                .map(|step| start.offset(direction, step as i32))
                .take_while(|cell| cell.is_within_bounds(grid_size) && !occupied.contains(cell))
                .collect();

            if run.len() == size {
                return run;
            }
        }
    }

    debug!(grid_size, size, "no straight obstacle run fits");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::{place_obstacle, place_obstacle_cluster};
    use crate::grid::{Occupied, free_cells};
    use crate::random::ScriptedRandom;
    use crate::snake::{Position, Snake};

    fn single_cell_snake(x: i32, y: i32) -> Snake {
        Snake::from_segments(vec![Position::new(x, y)]).expect("non-empty snake")
    }

    fn is_straight_contiguous_line(cells: &[Position]) -> bool {
        if cells.len() < 2 {
            return true;
        }

        let dx = cells[1].x - cells[0].x;
        let dy = cells[1].y - cells[0].y;
        if dx.abs() + dy.abs() != 1 {
            return false;
        }

        cells
            .windows(2)
            .all(|pair| pair[1].x - pair[0].x == dx && pair[1].y - pair[0].y == dy)
    }

    #[test]
    fn single_obstacle_avoids_snake_food_and_obstacles() {
        let obstacle = place_obstacle(
            2,
            &single_cell_snake(0, 0),
            Some(Position::new(1, 0)),
            &[Position::new(0, 1)],
            &mut ScriptedRandom::zeros(),
        );

        assert_eq!(obstacle, Some(Position::new(1, 1)));
    }

    #[test]
    fn single_obstacle_on_full_grid_is_none() {
        let obstacle = place_obstacle(
            2,
            &single_cell_snake(0, 0),
            Some(Position::new(1, 0)),
            &[Position::new(0, 1), Position::new(1, 1)],
            &mut ScriptedRandom::zeros(),
        );

        assert_eq!(obstacle, None);
    }

    #[test]
    fn zero_draws_give_three_cells_from_first_free_cell() {
        let cluster = place_obstacle_cluster(
            8,
            &single_cell_snake(0, 0),
            Some(Position::new(7, 7)),
            &[],
            3,
            &mut ScriptedRandom::zeros(),
        );

        // Up from (1, 0) leaves the grid, so Right is the first fit.
        assert_eq!(
            cluster,
            vec![Position::new(1, 0), Position::new(2, 0), Position::new(3, 0)]
        );
        assert!(is_straight_contiguous_line(&cluster));
    }

    #[test]
    fn direction_rotation_starts_at_drawn_offset() {
        let snake = single_cell_snake(0, 0);

        let down = place_obstacle_cluster(4, &snake, None, &[], 3, &mut ScriptedRandom::new([0.0, 0.5]));
        assert_eq!(
            down,
            vec![Position::new(1, 0), Position::new(1, 1), Position::new(1, 2)]
        );

        // Left hits the snake, Up leaves the grid, so the scan wraps to Right.
        let wrapped = place_obstacle_cluster(4, &snake, None, &[], 3, &mut ScriptedRandom::new([0.0, 0.75]));
        assert_eq!(
            wrapped,
            vec![Position::new(1, 0), Position::new(2, 0), Position::new(3, 0)]
        );
    }

    #[test]
    fn start_rotation_starts_at_drawn_offset() {
        let cluster = place_obstacle_cluster(
            4,
            &single_cell_snake(0, 0),
            None,
            &[],
            3,
            &mut ScriptedRandom::new([0.99, 0.0]),
        );

        assert_eq!(
            cluster,
            vec![Position::new(3, 3), Position::new(3, 2), Position::new(3, 1)]
        );
    }

    #[test]
    fn checkerboard_leaves_no_room_for_a_run() {
        let obstacles: Vec<Position> = (0..4)
            .flat_map(|y| (0..4).map(move |x| Position::new(x, y)))
            .filter(|cell| (cell.x + cell.y) % 2 == 0 && *cell != Position::new(0, 0))
            .collect();

        let cluster = place_obstacle_cluster(
            4,
            &single_cell_snake(0, 0),
            None,
            &obstacles,
            3,
            &mut ScriptedRandom::zeros(),
        );

        assert!(cluster.is_empty());
    }

    #[test]
    fn too_few_free_cells_fails_without_drawing() {
        let mut obstacles: Vec<Position> = free_cells(4, &Occupied::new());
        obstacles.retain(|cell| *cell != Position::new(0, 0) && cell.y != 3);
        let mut random = ScriptedRandom::new([0.3, 0.3]);

        // Only the bottom row is free, four cells: a run of five cannot fit.
        let cluster = place_obstacle_cluster(4, &single_cell_snake(0, 0), None, &obstacles, 5, &mut random);

        assert!(cluster.is_empty());
        assert_eq!(random.remaining(), 2);
    }

    #[test]
    fn runs_are_validated_against_the_pre_scan_occupied_set() {
        let snake = single_cell_snake(0, 0);
        let obstacles = [Position::new(2, 1)];
        let food = Some(Position::new(3, 0));

        // From (1, 0): Up is out of bounds, Right reaches the food, Down is
        // clear; earlier rejected candidates must not taint later ones.
        let cluster = place_obstacle_cluster(4, &snake, food, &obstacles, 3, &mut ScriptedRandom::zeros());

        assert_eq!(
            cluster,
            vec![Position::new(1, 0), Position::new(1, 1), Position::new(1, 2)]
        );
    }

    #[test]
    fn random_clusters_are_straight_in_bounds_and_previously_free() {
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..200 {
            let snake = single_cell_snake(rng.gen_range(0..8), rng.gen_range(0..8));
            let obstacles: Vec<Position> = (0..10)
                .map(|_| Position::new(rng.gen_range(0..8), rng.gen_range(0..8)))
                .collect();
            let food = Some(Position::new(rng.gen_range(0..8), rng.gen_range(0..8)));

            let cluster = place_obstacle_cluster(8, &snake, food, &obstacles, 3, &mut rng);
            if cluster.is_empty() {
                continue;
            }

            assert_eq!(cluster.len(), 3);
            assert!(is_straight_contiguous_line(&cluster));
            for cell in &cluster {
                assert!(cell.is_within_bounds(8));
                assert!(!snake.occupies(*cell));
                assert!(!obstacles.contains(cell));
                assert_ne!(Some(*cell), food);
            }
        }
    }
}
