use crate::chaos::roll_chaos;
use crate::config::GameConfig;
use crate::constants::LOG_SOLVER_DONE;
use crate::events::EventKind;
use crate::result::GameSummary;
use crate::schedule::generate_schedule;
use crate::solver::{SolverError, solve};
use crate::state::{Action, GameSnapshot, GameState};
use crate::turn::{GameError, RngBundle, TurnOutcome, advance_with};

/// High-level session wrapper binding configuration, RNG streams and the
/// exclusively owned game state.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    seed: u64,
    rng: RngBundle,
    state: GameState,
    /// Set once the game ends; holds the solver failure if the replay had no
    /// surviving plan.
    summary: Option<Result<GameSummary, SolverError>>,
}

impl GameSession {
    /// Start a new game with a freshly generated schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = RngBundle::from_user_seed(seed);
        let schedule = generate_schedule(&config, rng.schedule());
        let state = GameState::new(&config, schedule);
        Ok(Self {
            config,
            seed,
            rng,
            state,
            summary: None,
        })
    }

    /// Start a game on a caller-supplied schedule; chaos still comes from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the schedule
    /// length does not match `total_days`.
    pub fn with_schedule(
        config: GameConfig,
        seed: u64,
        schedule: Vec<EventKind>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if schedule.len() != config.day_count() {
            return Err(GameError::ScheduleLength {
                expected: config.day_count(),
                actual: schedule.len(),
            });
        }
        let state = GameState::new(&config, schedule);
        Ok(Self {
            config,
            seed,
            rng: RngBundle::from_user_seed(seed),
            state,
            summary: None,
        })
    }

    /// Reset to the starting configuration with a newly drawn schedule.
    pub fn init_game(&mut self) -> &GameState {
        let schedule = generate_schedule(&self.config, self.rng.schedule());
        self.state = GameState::new(&self.config, schedule);
        self.summary = None;
        &self.state
    }

    /// Deterministically reseed and start over.
    pub fn reseed(&mut self, seed: u64) -> &GameState {
        self.seed = seed;
        self.rng = RngBundle::from_user_seed(seed);
        self.init_game()
    }

    /// Play one day. The only mutating entry point per turn.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameOver`] once the session has ended. A solver
    /// failure on the final turn does not fail the turn; it surfaces from
    /// [`Self::on_game_end`].
    pub fn submit_action(&mut self, action: Action) -> Result<TurnOutcome, GameError> {
        let rng = &mut self.rng;
        let outcome = advance_with(&mut self.state, &self.config, action, || {
            roll_chaos(rng.chaos())
        })?;
        if outcome.ended() {
            self.finish();
        }
        Ok(outcome)
    }

    /// Parse a textual intent and play it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownAction`] for unrecognized input without
    /// touching state, or any error from [`Self::submit_action`].
    pub fn submit_label(&mut self, label: &str) -> Result<TurnOutcome, GameError> {
        let action: Action = label.parse()?;
        self.submit_action(action)
    }

    fn finish(&mut self) {
        let solved = solve(&self.config, &self.state.schedule);
        match &solved {
            Ok(solved) => log::info!(
                "{LOG_SOLVER_DONE}: best {} via {} (player {})",
                solved.best_score,
                solved.bits(),
                self.state.total_score
            ),
            Err(err) => log::warn!("{LOG_SOLVER_DONE}: {err}"),
        }
        self.summary = Some(solved.map(|solved| GameSummary::new(&self.state, solved)));
    }

    /// Final score and solver comparison.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameInProgress`] until the session has ended, or
    /// [`GameError::Solver`] if the ended game could not be solved.
    pub fn on_game_end(&self) -> Result<&GameSummary, GameError> {
        match &self.summary {
            Some(Ok(summary)) => Ok(summary),
            Some(Err(err)) => Err(GameError::Solver(err.clone())),
            None => Err(GameError::GameInProgress {
                day: self.state.current_day,
            }),
        }
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        self.state.snapshot()
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Draw counts for the (schedule, chaos) streams.
    #[must_use]
    pub const fn rng_draws(&self) -> (u64, u64) {
        self.rng.draws()
    }

    /// Consume the session, returning the underlying game state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}
