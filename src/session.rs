use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::game::{GameState, GameStatus};
use crate::input::GameInput;

/// Result of one session tick, as a shell would present it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionOutcome {
    Running,
    Paused,
    GameOver,
    /// No free cell was left for food.
    Victory,
}

/// Single-writer owner of the current state and its random source.
///
/// Input is merged between ticks; at most one pending turn is buffered and
/// later commands overwrite earlier ones.
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    rng: StdRng,
    seed: u64,
    best_score: u32,
}

impl Session {
    /// Starts a reproducible session.
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = GameState::new(config, &mut rng)?;

        Ok(Self {
            state,
            rng,
            seed,
            best_score: 0,
        })
    }

    /// Starts a session from an entropy-derived seed.
    pub fn from_entropy(config: EngineConfig) -> Result<Self, ConfigError> {
        let seed: u64 = rand::thread_rng().r#gen();
        Self::new(config, seed)
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Highest score reached in any game of this session. Not persisted.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Applies one input event.
    ///
    /// A direction after game over restarts the game before it is queued.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.state.is_game_over() {
                    self.restart();
                }
                let pending = self.state.resolve_direction(direction);
                self.state = self.state.with_pending_direction(pending);
            }
            GameInput::Pause => self.state = self.state.toggle_pause(),
            GameInput::Restart => self.restart(),
        }
    }

    /// Rebuilds the initial state with the same configuration, continuing
    /// the session's random stream.
    pub fn restart(&mut self) {
        debug!(score = self.state.score, best_score = self.best_score, "game restarted");
        self.state = GameState::initial(self.state.config, &mut self.rng);
    }

    /// Advances one tick and reports the outcome.
    pub fn tick(&mut self) -> SessionOutcome {
        self.state = self.state.step(&mut self.rng);
        self.best_score = self.best_score.max(self.state.score);
        self.outcome()
    }

    /// Outcome for the current state without advancing.
    #[must_use]
    pub fn outcome(&self) -> SessionOutcome {
        match self.state.status {
            GameStatus::GameOver => SessionOutcome::GameOver,
            _ if self.state.is_victory() => SessionOutcome::Victory,
            GameStatus::Paused => SessionOutcome::Paused,
            GameStatus::Playing => SessionOutcome::Running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, SessionOutcome};
    use crate::config::EngineConfig;
    use crate::error::ConfigError;
    use crate::game::GameStatus;
    use crate::input::{Direction, GameInput};
    use crate::snake::Position;

    #[test]
    fn same_seed_replays_the_same_game() {
        let mut first = Session::new(EngineConfig::with_grid_size(10), 5).expect("valid config");
        let mut second = Session::new(EngineConfig::with_grid_size(10), 5).expect("valid config");

        for _ in 0..50 {
            first.tick();
            second.tick();
        }

        assert_eq!(first.state(), second.state());
        assert_eq!(first.seed(), 5);
    }

    #[test]
    fn entropy_seed_is_reported_for_replay() {
        let config = EngineConfig::with_grid_size(10);
        let mut original = Session::from_entropy(config).expect("valid config");
        let mut replay = Session::new(config, original.seed()).expect("valid config");

        for _ in 0..20 {
            original.tick();
            replay.tick();
        }

        assert_eq!(original.state(), replay.state());
    }

    #[test]
    fn later_turns_overwrite_earlier_ones() {
        let mut session = Session::new(EngineConfig::with_grid_size(10), 1).expect("valid config");

        session.apply_input(GameInput::Direction(Direction::Up));
        session.apply_input(GameInput::Direction(Direction::Down));

        assert_eq!(session.state().pending_direction, Direction::Down);
    }

    #[test]
    fn pause_freezes_ticks() {
        let mut session = Session::new(EngineConfig::with_grid_size(10), 2).expect("valid config");
        session.apply_input(GameInput::Pause);
        let frozen = session.state().clone();

        assert_eq!(session.tick(), SessionOutcome::Paused);
        assert_eq!(session.state(), &frozen);

        session.apply_input(GameInput::Pause);
        assert_eq!(session.tick(), SessionOutcome::Running);
        assert_eq!(session.state().tick_count, 1);
    }

    #[test]
    fn direction_after_game_over_restarts() {
        let mut session = Session::new(EngineConfig::classic(6), 3).expect("valid config");
        session.state.status = GameStatus::GameOver;
        assert_eq!(session.outcome(), SessionOutcome::GameOver);

        session.apply_input(GameInput::Direction(Direction::Up));

        assert_eq!(session.state().status, GameStatus::Playing);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().pending_direction, Direction::Up);
    }

    #[test]
    fn restart_keeps_configuration() {
        let config = EngineConfig::classic(8);
        let mut session = Session::new(config, 4).expect("valid config");
        session.tick();

        session.apply_input(GameInput::Restart);

        assert_eq!(session.state().config, config);
        assert_eq!(session.state().tick_count, 0);
    }

    #[test]
    fn invalid_config_is_reported() {
        assert!(Session::new(EngineConfig::with_grid_size(1), 0).is_err());
    }

    #[test]
    fn oversized_grid_is_reported_before_allocating() {
        let result = Session::new(EngineConfig::with_grid_size(u16::MAX), 1);

        assert!(matches!(result, Err(ConfigError::GridTooLarge(u16::MAX))));
    }

    #[test]
    fn best_score_survives_restart() {
        let mut session = Session::new(EngineConfig::classic(10), 6).expect("valid config");
        let head = session.state().snake.head();
        session.state.food = Some(Position::new(head.x + 1, head.y));

        session.tick();
        assert_eq!(session.state().score, 1);
        assert_eq!(session.best_score(), 1);

        session.apply_input(GameInput::Restart);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.best_score(), 1);

        session.tick();
        assert_eq!(session.best_score(), 1);
    }
}
