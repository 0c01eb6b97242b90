use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default side length of the square grid.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest grid that fits the centred three-segment starting snake.
pub const MIN_GRID_SIZE: u16 = 4;

/// Largest grid accepted; placement scans every cell.
pub const MAX_GRID_SIZE: u16 = 1024;

/// Length of a straight obstacle cluster.
pub const MIN_OBSTACLE_CLUSTER_SIZE: usize = 3;

/// Cadence policy: attempt a spawn every this many ticks.
pub const DEFAULT_CADENCE_TICKS: u64 = 6;

/// Cadence policy: probability that a due spawn attempt happens.
pub const DEFAULT_CADENCE_SPAWN_CHANCE: f64 = 0.3;

/// Cadence policy: floor of the obstacle cap.
pub const MIN_CADENCE_OBSTACLE_CAP: usize = 6;

/// What happens when the head leaves the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallMode {
    /// Toroidal grid: the head re-enters on the opposite edge.
    #[default]
    Wrap,
    /// Leaving the grid ends the game.
    Bounded,
}

/// How obstacles appear over the lifetime of a game.
///
/// Exactly one policy is active per game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObstaclePolicy {
    /// Obstacles never appear.
    None,
    /// Each eaten food spawns one straight cluster of `size` cells.
    EatCluster { size: usize },
    /// Every `every_ticks` ticks, with probability `spawn_chance`, spawn one
    /// cell while the total stays below the cap.
    Cadence {
        every_ticks: u64,
        spawn_chance: f64,
        /// Defaults to `max(6, grid_size / 2)` when absent.
        #[serde(default)]
        max_obstacles: Option<usize>,
    },
}

impl ObstaclePolicy {
    /// Cadence policy with the default interval, chance and cap.
    #[must_use]
    pub fn cadence() -> Self {
        Self::Cadence {
            every_ticks: DEFAULT_CADENCE_TICKS,
            spawn_chance: DEFAULT_CADENCE_SPAWN_CHANCE,
            max_obstacles: None,
        }
    }
}

impl Default for ObstaclePolicy {
    fn default() -> Self {
        Self::EatCluster {
            size: MIN_OBSTACLE_CLUSTER_SIZE,
        }
    }
}

/// Variant selection for one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Side length of the square grid.
    pub grid_size: u16,
    pub walls: WallMode,
    pub obstacles: ObstaclePolicy,
    /// Alternate apple/orange each time food is eaten.
    pub fruit_toggle: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            walls: WallMode::default(),
            obstacles: ObstaclePolicy::default(),
            fruit_toggle: true,
        }
    }
}

impl EngineConfig {
    /// Default variant on a grid of `grid_size`.
    #[must_use]
    pub fn with_grid_size(grid_size: u16) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }

    /// Plain wrap-around game: no obstacles, no fruit toggle.
    #[must_use]
    pub fn classic(grid_size: u16) -> Self {
        Self {
            grid_size,
            walls: WallMode::Wrap,
            obstacles: ObstaclePolicy::None,
            fruit_toggle: false,
        }
    }

    /// Checks that every parameter describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.grid_size));
        }

        match self.obstacles {
            ObstaclePolicy::None => Ok(()),
            ObstaclePolicy::EatCluster { size } if size == 0 => Err(ConfigError::EmptyCluster),
            ObstaclePolicy::EatCluster { .. } => Ok(()),
            ObstaclePolicy::Cadence {
                every_ticks,
                spawn_chance,
                ..
            } => {
                if every_ticks == 0 {
                    return Err(ConfigError::ZeroCadence);
                }
                if !(0.0..=1.0).contains(&spawn_chance) {
                    return Err(ConfigError::InvalidSpawnChance(spawn_chance));
                }
                Ok(())
            }
        }
    }

    /// Parses and validates a JSON config. Missing fields take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Obstacle cap for the cadence policy, `None` for other policies.
    #[must_use]
    pub fn cadence_obstacle_cap(&self) -> Option<usize> {
        match self.obstacles {
            ObstaclePolicy::Cadence { max_obstacles, .. } => Some(max_obstacles.unwrap_or_else(
                || MIN_CADENCE_OBSTACLE_CAP.max(usize::from(self.grid_size / 2)),
            )),
            _ => None,
        }
    }
}
