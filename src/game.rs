use serde::Serialize;
use tracing::{debug, info};

use crate::config::{EngineConfig, ObstaclePolicy, WallMode};
use crate::error::ConfigError;
use crate::food::{FoodKind, place_food};
use crate::input::{Direction, direction_change_is_valid};
use crate::obstacle::{place_obstacle, place_obstacle_cluster};
use crate::random::RandomSource;
use crate::snake::{Position, Snake};

/// Segments in a freshly created snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    SelfCollision,
    Obstacle,
    Wall,
}

/// Complete game state for one tick.
///
/// Transitions never mutate a state; [`GameState::step`] returns its
/// successor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    pub config: EngineConfig,
    pub snake: Snake,
    /// Direction applied on the last completed step.
    pub direction: Direction,
    /// Direction applied on the next step.
    pub pending_direction: Direction,
    /// `None` only when no free cell was left.
    pub food: Option<Position>,
    pub food_kind: FoodKind,
    pub obstacles: Vec<Position>,
    pub tick_count: u64,
    pub score: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
}

impl GameState {
    /// Creates the starting state: a three-segment snake heading right from
    /// the centre, one food item, no obstacles.
    pub fn new<R: RandomSource + ?Sized>(
        config: EngineConfig,
        random: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::initial(config, random))
    }

    /// Starting state for a config that has already been validated.
    pub(crate) fn initial<R: RandomSource + ?Sized>(config: EngineConfig, random: &mut R) -> Self {
        let center = i32::from(config.grid_size / 2);
        let snake = Snake::straight(
            Position::new(center, center),
            Direction::Right,
            INITIAL_SNAKE_LENGTH,
        );
        let food = place_food(config.grid_size, &snake, &[], random);

        Self {
            config,
            snake,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food,
            food_kind: FoodKind::Apple,
            obstacles: Vec::new(),
            tick_count: 0,
            score: 0,
            status: GameStatus::Playing,
            death_reason: None,
        }
    }

    /// Side length of the grid.
    #[must_use]
    pub fn grid_size(&self) -> u16 {
        self.config.grid_size
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    /// The board filled up: no food could be placed and the snake is alive.
    #[must_use]
    pub fn is_victory(&self) -> bool {
        self.food.is_none() && !self.is_game_over()
    }

    /// Resolves a direction name into the next pending direction.
    ///
    /// Unknown names are ignored and keep the current pending direction.
    #[must_use]
    pub fn queue_direction(&self, requested: &str) -> Direction {
        match requested.parse::<Direction>() {
            Ok(direction) => self.resolve_direction(direction),
            Err(_) => self.pending_direction,
        }
    }

    /// Resolves a direction into the next pending direction.
    ///
    /// A reversal of the committed direction is ignored while the snake has
    /// more than one segment.
    #[must_use]
    pub fn resolve_direction(&self, requested: Direction) -> Direction {
        if self.snake.len() > 1 && !direction_change_is_valid(self.direction, requested) {
            return self.pending_direction;
        }
        requested
    }

    /// Returns a copy with `direction` written into the pending slot.
    #[must_use]
    pub fn with_pending_direction(&self, direction: Direction) -> Self {
        Self {
            pending_direction: direction,
            ..self.clone()
        }
    }

    /// Returns a copy with pause toggled. A finished game stays finished.
    #[must_use]
    pub fn toggle_pause(&self) -> Self {
        let status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            GameStatus::GameOver => return self.clone(),
        };
        Self {
            status,
            ..self.clone()
        }
    }

    /// Advances the simulation by one tick and returns the new state.
    ///
    /// Paused and finished states are returned unchanged.
    #[must_use]
    pub fn step<R: RandomSource + ?Sized>(&self, random: &mut R) -> Self {
        if self.status != GameStatus::Playing {
            return self.clone();
        }

        let grid_size = self.grid_size();
        let direction = self.pending_direction;
        let target = self.snake.head().offset(direction, 1);

        let new_head = match self.config.walls {
            WallMode::Wrap => target.wrapped(grid_size),
            WallMode::Bounded if target.is_within_bounds(grid_size) => target,
            WallMode::Bounded => return self.ended(direction, DeathReason::Wall),
        };

        let will_eat = self.food == Some(new_head);
        if self.snake.blocks(new_head, will_eat) {
            return self.ended(direction, DeathReason::SelfCollision);
        }
        if self.obstacles.contains(&new_head) {
            return self.ended(direction, DeathReason::Obstacle);
        }

        let snake = self.snake.advanced(new_head, will_eat);
        let mut obstacles = self.obstacles.clone();
        let mut food = self.food;
        let mut food_kind = self.food_kind;
        let mut score = self.score;
        let tick_count = self.tick_count + 1;

        if will_eat {
            score += 1;
            food = place_food(grid_size, &snake, &obstacles, random);
            if self.config.fruit_toggle {
                food_kind = food_kind.toggled();
            }
            debug!(score, len = snake.len(), ?food, "food eaten");
        }

        let spawned = match self.config.obstacles {
            ObstaclePolicy::None => Vec::new(),
            ObstaclePolicy::EatCluster { size } if will_eat => {
                place_obstacle_cluster(grid_size, &snake, food, &obstacles, size, random)
            }
            ObstaclePolicy::EatCluster { .. } => Vec::new(),
            ObstaclePolicy::Cadence {
                every_ticks,
                spawn_chance,
                ..
            } => {
                let cap = self.config.cadence_obstacle_cap().unwrap_or(0);
                if tick_count % every_ticks == 0
                    && obstacles.len() < cap
                    && random.next_unit() < spawn_chance
                {
                    place_obstacle(grid_size, &snake, food, &obstacles, random)
                        .into_iter()
                        .collect()
                } else {
                    Vec::new()
                }
            }
        };

        // Both placements treat the new food as occupied, so spawned cells
        // never cover it.
        obstacles.extend(spawned);

        if food.is_none() {
            debug!(score, "no free cell left for food");
        }

        Self {
            config: self.config,
            snake,
            direction,
            pending_direction: direction,
            food,
            food_kind,
            obstacles,
            tick_count,
            score,
            status: GameStatus::Playing,
            death_reason: None,
        }
    }

    fn ended(&self, direction: Direction, reason: DeathReason) -> Self {
        info!(?reason, score = self.score, "game over");
        Self {
            direction,
            status: GameStatus::GameOver,
            death_reason: Some(reason),
            ..self.clone()
        }
    }
}

/// Builds the starting state for `config`.
pub fn create_initial_state<R: RandomSource + ?Sized>(
    config: EngineConfig,
    random: &mut R,
) -> Result<GameState, ConfigError> {
    GameState::new(config, random)
}

/// Advances `state` by one tick.
#[must_use]
pub fn step_game<R: RandomSource + ?Sized>(state: &GameState, random: &mut R) -> GameState {
    state.step(random)
}
