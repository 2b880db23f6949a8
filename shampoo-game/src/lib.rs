//! Shampoo Strategist Game Engine
//!
//! Platform-agnostic core game logic for the Shampoo Strategist decision game:
//! across a fixed number of days the player chooses to wash or wait, trading
//! hair health against the hair-quality cycle to score against scheduled
//! events and random chaos. This crate provides the tables, schedule
//! generation, scoring, turn engine and retrospective solver without UI or
//! platform-specific dependencies.

pub mod chaos;
pub mod config;
pub mod constants;
pub mod events;
pub mod hair;
pub mod numbers;
pub mod result;
pub mod schedule;
pub mod scoring;
pub mod seed;
pub mod solver;
pub mod state;
pub mod turn;

// Re-export commonly used types
pub use chaos::{ChaosKind, ChaosOutcome, chaos_table, roll_chaos};
pub use config::{ConfigError, GameConfig};
pub use events::{EventDefinition, EventKind};
pub use hair::{HairCycleEntry, hair_cycle_entry, hair_cycle_table, hair_quality};
pub use result::{GameSummary, Rating};
pub use schedule::{generate_schedule, has_required_events};
pub use scoring::{adjusted_quality, score_day};
pub use seed::{decode_to_seed, encode_friendly, generate_code_from_entropy};
pub use solver::{
    SolverError, SolverResult, SolverStrategy, evaluate_plan, solve, solve_exhaustive,
    solve_memoized,
};
pub use state::{
    Action, Ending, ForecastCard, GamePhase, GameSnapshot, GameState, HealthBand, TerminalReason,
    TurnRecord,
};
pub use turn::{
    DailyOutcome, GameError, GameSession, RngBundle, TurnOutcome, Vitals, advance, advance_with,
};

/// Start a session with the default rules.
///
/// # Errors
///
/// Never fails for the built-in configuration; the `Result` mirrors
/// [`GameSession::new`].
pub fn init_game(seed: u64) -> Result<GameSession, GameError> {
    GameSession::new(GameConfig::default(), seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_plays_to_completion() {
        let mut session = init_game(0xABCD).unwrap();
        let mut turns = 0;
        while !session.is_over() {
            let action = if turns % 3 == 0 {
                Action::Wash
            } else {
                Action::Wait
            };
            session.submit_action(action).unwrap();
            turns += 1;
        }
        assert_eq!(turns, 10);
        let summary = session.on_game_end().unwrap();
        assert_eq!(summary.ending, Ending::Completed);
        assert_eq!(summary.player_path.len(), 10);
    }

    #[test]
    fn snapshot_serializes_for_front_ends() {
        let session = init_game(3).unwrap();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["day_label"], "1/10");
        assert_eq!(json["hair_health"], 100);
        assert_eq!(json["schedule"].as_array().map(Vec::len), Some(10));
    }
}
