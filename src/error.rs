//! Errors raised at the edges of the engine.
//!
//! Game transitions themselves never fail; only building a configuration
//! can.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{MAX_GRID_SIZE, MIN_GRID_SIZE};

/// Invalid or unreadable engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Grid is too small to hold the initial snake
    #[error("grid size {0} is below the minimum of {min}", min = MIN_GRID_SIZE)]
    GridTooSmall(u16),

    /// Grid is too large to scan for free cells
    #[error("grid size {0} exceeds the maximum of {max}", max = MAX_GRID_SIZE)]
    GridTooLarge(u16),

    /// Obstacle cluster length of zero
    #[error("obstacle cluster size must be at least 1")]
    EmptyCluster,

    /// Cadence interval of zero ticks
    #[error("obstacle cadence must be at least 1 tick")]
    ZeroCadence,

    /// Spawn chance outside `[0, 1]`
    #[error("obstacle spawn chance {0} is outside [0, 1]")]
    InvalidSpawnChance(f64),

    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config contents are not valid JSON for an engine config
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
