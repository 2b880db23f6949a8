//! Turn engine: per-day state transitions, terminal detection and RNG streams.
use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sha2::Sha256;
use thiserror::Error;

use crate::chaos::ChaosKind;
use crate::config::{ConfigError, GameConfig};
use crate::constants::{
    LOG_ACTION_REJECTED, LOG_HAIR_FRIED, LOG_SCHEDULE_COMPLETE, LOG_TURN_CHAOS, LOG_TURN_SCORED,
};
use crate::scoring::score_day;
use crate::solver::SolverError;
use crate::state::{Action, Ending, GamePhase, GameState, TerminalReason, TurnRecord};

pub mod session;
pub use session::GameSession;

/// Errors raised by the turn engine and session API.
#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("game is over; no further actions are accepted")]
    GameOver,
    #[error("unknown action '{0}' (expected wash or wait)")]
    UnknownAction(String),
    #[error("game still in progress on day {day}")]
    GameInProgress { day: u32 },
    #[error("schedule has {actual} days but the configuration expects {expected}")]
    ScheduleLength { expected: usize, actual: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Health and hair-cycle position carried from day to day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vitals {
    pub health: i32,
    pub days_since_wash: u32,
}

impl Vitals {
    #[must_use]
    pub const fn starting(config: &GameConfig) -> Self {
        Self {
            health: config.starting_health,
            days_since_wash: config.starting_days_since_wash,
        }
    }

    /// Apply an action. Washing costs health and resets the cycle; waiting
    /// recovers health up to the cap and ages the hair by a day.
    #[must_use]
    pub fn after(self, action: Action, config: &GameConfig) -> Self {
        match action {
            Action::Wash => Self {
                health: self.health.saturating_sub(config.wash_cost),
                days_since_wash: 0,
            },
            Action::Wait => Self {
                health: self
                    .health
                    .saturating_add(config.wait_recovery)
                    .min(config.max_health),
                days_since_wash: self.days_since_wash.saturating_add(1),
            },
        }
    }

    #[must_use]
    pub const fn is_alive(self) -> bool {
        self.health > 0
    }
}

/// What a single submitted action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyOutcome {
    Scored(TurnRecord),
    Terminal(TerminalReason),
}

/// Result returned by a turn advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub outcome: DailyOutcome,
    /// Set when this turn moved the session into `GameOver`.
    pub ending: Option<Ending>,
}

impl TurnOutcome {
    #[must_use]
    pub const fn record(&self) -> Option<&TurnRecord> {
        match &self.outcome {
            DailyOutcome::Scored(record) => Some(record),
            DailyOutcome::Terminal(_) => None,
        }
    }

    #[must_use]
    pub const fn ended(&self) -> bool {
        self.ending.is_some()
    }
}

/// Advance one day with a caller-supplied chaos outcome.
///
/// # Errors
///
/// Returns [`GameError::GameOver`] when the session already ended; state is
/// left untouched in that case.
pub fn advance(
    state: &mut GameState,
    config: &GameConfig,
    action: Action,
    chaos: ChaosKind,
) -> Result<TurnOutcome, GameError> {
    advance_with(state, config, action, || chaos)
}

/// Advance one day, drawing chaos lazily so a fatal wash consumes no roll.
///
/// # Errors
///
/// Returns [`GameError::GameOver`] when the session already ended.
pub fn advance_with(
    state: &mut GameState,
    config: &GameConfig,
    action: Action,
    roll_chaos: impl FnOnce() -> ChaosKind,
) -> Result<TurnOutcome, GameError> {
    let Some(event) = state.current_event().filter(|_| !state.is_over()) else {
        log::warn!(
            "{LOG_ACTION_REJECTED}: {action} on day {} after game over",
            state.current_day
        );
        return Err(GameError::GameOver);
    };

    let vitals = Vitals {
        health: state.hair_health,
        days_since_wash: state.days_since_wash,
    }
    .after(action, config);
    state.hair_health = vitals.health;
    state.days_since_wash = vitals.days_since_wash;

    // Death is checked before chaos and scoring: a fatal day scores nothing.
    if !vitals.is_alive() {
        state.phase = GamePhase::GameOver;
        state.ending = Some(Ending::HairFried);
        log::info!(
            "{LOG_HAIR_FRIED}: day {} health {}",
            state.current_day,
            vitals.health
        );
        return Ok(TurnOutcome {
            outcome: DailyOutcome::Terminal(TerminalReason::HairFried {
                day: state.current_day,
                health: vitals.health,
            }),
            ending: Some(Ending::HairFried),
        });
    }

    let chaos = roll_chaos();
    if chaos.is_notable() {
        log::debug!("{LOG_TURN_CHAOS}: day {} {chaos:?}", state.current_day);
    }

    let score = score_day(vitals.days_since_wash, vitals.health, event, chaos);
    state.total_score += score;
    let record = TurnRecord {
        day: state.current_day,
        event,
        action,
        action_label: action.label().to_string(),
        score,
        health_after: vitals.health,
        days_since_wash_after: vitals.days_since_wash,
        chaos,
    };
    state.history.push(record.clone());
    state.current_day += 1;
    log::debug!(
        "{LOG_TURN_SCORED}: day {} {event:?} {action} -> {score} (total {})",
        record.day,
        state.total_score
    );

    let ending = if state.current_day as usize >= state.schedule.len() {
        state.phase = GamePhase::GameOver;
        state.ending = Some(Ending::Completed);
        log::info!("{LOG_SCHEDULE_COMPLETE}: final score {}", state.total_score);
        Some(Ending::Completed)
    } else {
        None
    };

    Ok(TurnOutcome {
        outcome: DailyOutcome::Scored(record),
        ending,
    })
}

/// Deterministic bundle of RNG streams segregated by simulation domain.
#[derive(Debug, Clone)]
pub struct RngBundle {
    schedule: CountingRng<SmallRng>,
    chaos: CountingRng<SmallRng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            schedule: CountingRng::new(derive_stream_seed(seed, b"schedule")),
            chaos: CountingRng::new(derive_stream_seed(seed, b"chaos")),
        }
    }

    /// Access the schedule RNG stream.
    pub fn schedule(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.schedule
    }

    /// Access the chaos RNG stream.
    pub fn chaos(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.chaos
    }

    /// Draw counts as (schedule, chaos).
    #[must_use]
    pub const fn draws(&self) -> (u64, u64) {
        (self.schedule.draws(), self.chaos.draws())
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use rand::Rng;

    fn chill_state(config: &GameConfig) -> GameState {
        GameState::new(config, vec![EventKind::Chill; config.day_count()])
    }

    #[test]
    fn wash_resets_cycle_and_costs_health() {
        let cfg = GameConfig::default();
        let mut state = chill_state(&cfg);
        advance(&mut state, &cfg, Action::Wash, ChaosKind::None).unwrap();
        assert_eq!(state.days_since_wash, 0);
        assert_eq!(state.hair_health, 85);
        assert_eq!(state.current_day, 1);
    }

    #[test]
    fn wait_ages_hair_and_recovers_to_cap() {
        let cfg = GameConfig::default();
        let mut state = chill_state(&cfg);
        state.hair_health = 97;
        advance(&mut state, &cfg, Action::Wait, ChaosKind::None).unwrap();
        assert_eq!(state.days_since_wash, 3);
        assert_eq!(state.hair_health, 100);

        state.hair_health = 60;
        advance(&mut state, &cfg, Action::Wait, ChaosKind::None).unwrap();
        assert_eq!(state.days_since_wash, 4);
        assert_eq!(state.hair_health, 65);
    }

    #[test]
    fn fatal_wash_skips_chaos_and_history() {
        let cfg = GameConfig::default();
        let mut state = chill_state(&cfg);
        state.hair_health = 15;
        let mut rolled = false;
        let outcome = advance_with(&mut state, &cfg, Action::Wash, || {
            rolled = true;
            ChaosKind::Rain
        })
        .unwrap();
        assert!(!rolled);
        assert_eq!(
            outcome.outcome,
            DailyOutcome::Terminal(TerminalReason::HairFried { day: 0, health: 0 })
        );
        assert_eq!(outcome.ending, Some(Ending::HairFried));
        assert!(state.history.is_empty());
        assert_eq!(state.total_score, 0);
        assert_eq!(state.current_day, 0);
        assert!(state.is_over());
    }

    #[test]
    fn actions_after_game_over_are_rejected_without_mutation() {
        let cfg = GameConfig::default().with_total_days(2);
        let mut state = chill_state(&cfg);
        advance(&mut state, &cfg, Action::Wait, ChaosKind::None).unwrap();
        let last = advance(&mut state, &cfg, Action::Wait, ChaosKind::None).unwrap();
        assert_eq!(last.ending, Some(Ending::Completed));

        let before = state.clone();
        let err = advance(&mut state, &cfg, Action::Wash, ChaosKind::None).unwrap_err();
        assert_eq!(err, GameError::GameOver);
        assert_eq!(state, before);
    }

    #[test]
    fn scored_turn_records_chaos_and_totals() {
        let cfg = GameConfig::default();
        let mut state = GameState::new(&cfg, vec![EventKind::Meeting; 10]);
        state.days_since_wash = 0;
        let outcome = advance(&mut state, &cfg, Action::Wait, ChaosKind::Rain).unwrap();
        let record = outcome.record().unwrap();
        assert_eq!(record.score, 18);
        assert_eq!(record.chaos, ChaosKind::Rain);
        assert_eq!(record.action_label, "WAIT");
        assert_eq!(state.total_score, 18);
        assert!(!outcome.ended());
    }

    #[test]
    fn extreme_economies_saturate_instead_of_overflowing() {
        let cfg = GameConfig {
            wait_recovery: i32::MAX,
            max_health: i32::MAX,
            wash_cost: i32::MAX,
            ..GameConfig::default()
        };
        let rested = Vitals::starting(&cfg).after(Action::Wait, &cfg);
        assert_eq!(rested.health, i32::MAX);
        let washed = Vitals {
            health: -10,
            days_since_wash: 3,
        }
        .after(Action::Wash, &cfg);
        assert_eq!(washed.health, i32::MIN);
        assert!(!washed.is_alive());
    }

    #[test]
    fn rng_streams_are_deterministic_and_independent() {
        let mut a = RngBundle::from_user_seed(42);
        let mut b = RngBundle::from_user_seed(42);
        assert_eq!(a.chaos().r#gen::<u64>(), b.chaos().r#gen::<u64>());
        assert_eq!(a.draws(), (0, 1));

        let mut c = RngBundle::from_user_seed(42);
        assert_ne!(c.schedule().r#gen::<u64>(), c.chaos().r#gen::<u64>());
    }
}
