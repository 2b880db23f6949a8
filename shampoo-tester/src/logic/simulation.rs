use anyhow::{Context, Result};
use serde::Serialize;
use shampoo_game::constants::HAIR_FRIED_MESSAGE;
use shampoo_game::{
    Action, DailyOutcome, Ending, EventKind, GameConfig, GameSession, GameState, GameSummary,
};

use crate::logic::policy::GameplayStrategy;

/// Snapshot of one policy decision.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRecord {
    pub day: u32,
    pub event: EventKind,
    pub action: Action,
    pub policy_name: String,
    pub rationale: Option<String>,
    /// `None` on the day the hair fried.
    pub score: Option<i32>,
}

/// Everything a finished automated playthrough produced.
#[derive(Debug, Clone)]
pub struct PlaythroughSummary {
    pub seed: u64,
    pub strategy: GameplayStrategy,
    pub decisions: Vec<DecisionRecord>,
    pub final_state: GameState,
    pub result: GameSummary,
    pub ending_message: String,
    pub chaos_draws: u64,
}

impl PlaythroughSummary {
    #[must_use]
    pub fn fried(&self) -> bool {
        self.result.ending == Ending::HairFried
    }
}

/// Play one session to the end under `strategy`.
///
/// # Errors
///
/// Returns an error if the session cannot be created or the engine rejects
/// an action the policy produced.
pub fn run_playthrough(
    config: &GameConfig,
    strategy: GameplayStrategy,
    seed: u64,
) -> Result<PlaythroughSummary> {
    let mut session = GameSession::new(config.clone(), seed)
        .with_context(|| format!("failed to start session for seed {seed}"))?;
    let mut policy = strategy.create_policy(seed, session.config(), &session.state().schedule);
    let mut decisions = Vec::with_capacity(config.day_count());
    let mut ending_message = None;

    while !session.is_over() {
        let state = session.state();
        let day = state.current_day;
        let Some(event) = state.current_event() else {
            break;
        };
        let decision = policy.pick_action(state);
        log::trace!(
            "seed {seed} day {}: {} -> {}",
            day + 1,
            event,
            decision.action
        );

        let action = decision.action;
        let outcome = session
            .submit_action(action)
            .with_context(|| format!("seed {seed} rejected {action} on day {}", day + 1))?;
        if let DailyOutcome::Terminal(reason) = &outcome.outcome {
            ending_message = Some(reason.message().to_string());
        }
        decisions.push(DecisionRecord {
            day,
            event,
            action,
            policy_name: policy.name().to_string(),
            rationale: decision.rationale,
            score: outcome.record().map(|record| record.score),
        });
    }

    let result = session
        .on_game_end()
        .with_context(|| format!("seed {seed} stopped before the schedule ended"))?
        .clone();
    let ending_message = ending_message.unwrap_or_else(|| match result.ending {
        Ending::Completed => "Schedule complete".to_string(),
        Ending::HairFried => HAIR_FRIED_MESSAGE.to_string(),
    });
    let (_, chaos_draws) = session.rng_draws();

    Ok(PlaythroughSummary {
        seed,
        strategy,
        decisions,
        final_state: session.into_state(),
        result,
        ending_message,
        chaos_draws,
    })
}
