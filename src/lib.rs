//! Deterministic turn-based Snake engine.
//!
//! The engine is a set of pure transitions over [`game::GameState`]: every
//! step consumes a state plus a [`random::RandomSource`] and produces a new
//! state. Rendering, input devices and persistence belong to the caller.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod obstacle;
pub mod random;
pub mod session;
pub mod snake;
