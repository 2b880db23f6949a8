//! Retrospective solver: best chaos-free score achievable on a fixed schedule.
//!
//! The exhaustive search enumerates every wash/wait sequence as a bitmask
//! with day 0 in the most significant bit, so ascending masks visit paths in
//! lexicographic order and ties keep the earliest path found. The memoized
//! search reproduces the same optimum and the same tie-break for horizons too
//! long to enumerate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::chaos::ChaosKind;
use crate::config::GameConfig;
use crate::constants::{EXHAUSTIVE_SOLVER_MAX_DAYS, HAIR_CYCLE_MAX_BUCKET};
use crate::events::EventKind;
use crate::scoring::score_day;
use crate::state::Action;
use crate::turn::Vitals;

/// Best plan found for a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverResult {
    pub best_score: i32,
    /// One action per day; index `i` is day `i`.
    pub best_path: Vec<Action>,
}

impl SolverResult {
    /// Path as a `0`/`1` string, `1` meaning wash.
    #[must_use]
    pub fn bits(&self) -> String {
        self.best_path
            .iter()
            .map(|action| char::from(b'0' + action.as_bit()))
            .collect()
    }

    #[must_use]
    pub fn wash_days(&self) -> Vec<usize> {
        self.best_path
            .iter()
            .enumerate()
            .filter(|(_, action)| matches!(action, Action::Wash))
            .map(|(day, _)| day)
            .collect()
    }
}

/// Errors raised by the solver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("no action sequence survives all {days} days")]
    NoSurvivingPlan { days: usize },
    #[error("exhaustive search is limited to {max} days (got {days})")]
    HorizonTooLong { days: usize, max: usize },
}

/// Search strategy used for a given horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStrategy {
    Exhaustive,
    Memoized,
}

impl SolverStrategy {
    #[must_use]
    pub const fn for_days(days: usize) -> Self {
        if days <= EXHAUSTIVE_SOLVER_MAX_DAYS as usize {
            Self::Exhaustive
        } else {
            Self::Memoized
        }
    }
}

/// Solve with the strategy appropriate to the schedule length.
///
/// # Errors
///
/// Returns [`SolverError::NoSurvivingPlan`] when every sequence dies.
pub fn solve(config: &GameConfig, schedule: &[EventKind]) -> Result<SolverResult, SolverError> {
    match SolverStrategy::for_days(schedule.len()) {
        SolverStrategy::Exhaustive => solve_exhaustive(config, schedule),
        SolverStrategy::Memoized => solve_memoized(config, schedule),
    }
}

/// Replay a plan without chaos. `None` if health hits zero on any day.
#[must_use]
pub fn evaluate_plan(config: &GameConfig, schedule: &[EventKind], plan: &[Action]) -> Option<i32> {
    let mut vitals = Vitals::starting(config);
    let mut total = 0;
    for (&event, &action) in schedule.iter().zip(plan) {
        vitals = vitals.after(action, config);
        if !vitals.is_alive() {
            return None;
        }
        total += score_day(vitals.days_since_wash, vitals.health, event, ChaosKind::None);
    }
    Some(total)
}

/// Brute-force every one of the `2^N` sequences.
///
/// # Errors
///
/// Returns [`SolverError::HorizonTooLong`] past the enumeration limit and
/// [`SolverError::NoSurvivingPlan`] when every sequence dies.
pub fn solve_exhaustive(
    config: &GameConfig,
    schedule: &[EventKind],
) -> Result<SolverResult, SolverError> {
    let days = schedule.len();
    let max = EXHAUSTIVE_SOLVER_MAX_DAYS as usize;
    if days > max {
        return Err(SolverError::HorizonTooLong { days, max });
    }

    let mut best: Option<(i32, u64)> = None;
    for mask in 0..(1_u64 << days) {
        let mut vitals = Vitals::starting(config);
        let mut total = 0;
        let mut alive = true;
        for (day, &event) in schedule.iter().enumerate() {
            let wash = (mask >> (days - 1 - day)) & 1 == 1;
            vitals = vitals.after(Action::from_bit(wash), config);
            if !vitals.is_alive() {
                alive = false;
                break;
            }
            total += score_day(vitals.days_since_wash, vitals.health, event, ChaosKind::None);
        }
        if alive && best.is_none_or(|(score, _)| total > score) {
            best = Some((total, mask));
        }
    }

    let (best_score, mask) = best.ok_or(SolverError::NoSurvivingPlan { days })?;
    let best_path = (0..days)
        .map(|day| Action::from_bit((mask >> (days - 1 - day)) & 1 == 1))
        .collect();
    Ok(SolverResult {
        best_score,
        best_path,
    })
}

/// Memoized search over (day, hair-cycle bucket, health).
///
/// # Errors
///
/// Returns [`SolverError::NoSurvivingPlan`] when every sequence dies.
pub fn solve_memoized(
    config: &GameConfig,
    schedule: &[EventKind],
) -> Result<SolverResult, SolverError> {
    let days = schedule.len();
    let mut search = MemoSearch {
        config,
        schedule,
        memo: HashMap::new(),
    };
    let start = bucketed(Vitals::starting(config));
    let best_score = search
        .best_from(0, start)
        .ok_or(SolverError::NoSurvivingPlan { days })?;

    // Walk forward preferring Wait whenever it still reaches the optimum,
    // which yields the lexicographically first optimal path.
    let mut best_path = Vec::with_capacity(days);
    let mut vitals = start;
    let mut remaining = best_score;
    for (day, &event) in schedule.iter().enumerate() {
        let mut chosen = None;
        for action in [Action::Wait, Action::Wash] {
            let Some((next, gained)) = search.step(vitals, action, event) else {
                continue;
            };
            if search.best_from(day + 1, next) == Some(remaining - gained) {
                chosen = Some((action, next, gained));
                break;
            }
        }
        let (action, next, gained) = chosen.ok_or(SolverError::NoSurvivingPlan { days })?;
        best_path.push(action);
        vitals = next;
        remaining -= gained;
    }

    Ok(SolverResult {
        best_score,
        best_path,
    })
}

/// Every days-since-wash value past the last bucket scores and ages identically.
fn bucketed(vitals: Vitals) -> Vitals {
    Vitals {
        health: vitals.health,
        days_since_wash: vitals.days_since_wash.min(HAIR_CYCLE_MAX_BUCKET),
    }
}

struct MemoSearch<'a> {
    config: &'a GameConfig,
    schedule: &'a [EventKind],
    memo: HashMap<(usize, Vitals), Option<i32>>,
}

impl MemoSearch<'_> {
    fn step(&self, vitals: Vitals, action: Action, event: EventKind) -> Option<(Vitals, i32)> {
        let next = bucketed(vitals.after(action, self.config));
        if !next.is_alive() {
            return None;
        }
        let gained = score_day(next.days_since_wash, next.health, event, ChaosKind::None);
        Some((next, gained))
    }

    fn best_from(&mut self, day: usize, vitals: Vitals) -> Option<i32> {
        let Some(&event) = self.schedule.get(day) else {
            return Some(0);
        };
        if let Some(&cached) = self.memo.get(&(day, vitals)) {
            return cached;
        }
        let mut best: Option<i32> = None;
        for action in [Action::Wait, Action::Wash] {
            if let Some((next, gained)) = self.step(vitals, action, event)
                && let Some(rest) = self.best_from(day + 1, next)
            {
                let total = gained + rest;
                if best.is_none_or(|b| total > b) {
                    best = Some(total);
                }
            }
        }
        self.memo.insert((day, vitals), best);
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_schedule() -> Vec<EventKind> {
        vec![
            EventKind::Chill,
            EventKind::Meeting,
            EventKind::Workout,
            EventKind::Party,
            EventKind::Date,
            EventKind::Chill,
            EventKind::Chill,
            EventKind::Workout,
            EventKind::Meeting,
            EventKind::Party,
        ]
    }

    #[test]
    fn exhaustive_beats_every_alive_candidate() {
        let cfg = GameConfig::default();
        let schedule = default_schedule();
        let result = solve_exhaustive(&cfg, &schedule).unwrap();
        let mut best_seen = i32::MIN;
        for mask in 0_u32..1024 {
            let plan: Vec<Action> = (0..10)
                .map(|day| Action::from_bit((mask >> (9 - day)) & 1 == 1))
                .collect();
            if let Some(score) = evaluate_plan(&cfg, &schedule, &plan) {
                assert!(result.best_score >= score);
                best_seen = best_seen.max(score);
            }
        }
        assert_eq!(result.best_score, best_seen);
        assert_eq!(evaluate_plan(&cfg, &schedule, &result.best_path), Some(best_seen));
    }

    #[test]
    fn two_chill_days_wash_first() {
        let cfg = GameConfig::default().with_total_days(2);
        let schedule = vec![EventKind::Chill, EventKind::Chill];
        let result = solve_exhaustive(&cfg, &schedule).unwrap();
        // wash/wait: 9 + 10 = 19 is the unique optimum.
        assert_eq!(result.best_score, 19);
        assert_eq!(result.bits(), "10");
        assert_eq!(result.wash_days(), vec![0]);
    }

    #[test]
    fn memoized_matches_exhaustive() {
        let cfg = GameConfig::default();
        let schedule = default_schedule();
        assert_eq!(
            solve_memoized(&cfg, &schedule).unwrap(),
            solve_exhaustive(&cfg, &schedule).unwrap()
        );
    }

    #[test]
    fn long_horizons_use_memoized_search() {
        let cfg = GameConfig::default().with_total_days(40);
        let schedule: Vec<EventKind> = (0..40).map(|i| EventKind::ALL[i % 5]).collect();
        assert_eq!(SolverStrategy::for_days(40), SolverStrategy::Memoized);
        assert_eq!(
            solve_exhaustive(&cfg, &schedule).unwrap_err(),
            SolverError::HorizonTooLong { days: 40, max: 20 }
        );
        let result = solve(&cfg, &schedule).unwrap();
        assert_eq!(result.best_path.len(), 40);
        assert_eq!(
            evaluate_plan(&cfg, &schedule, &result.best_path),
            Some(result.best_score)
        );
    }

    #[test]
    fn dead_plans_are_discarded() {
        let cfg = GameConfig {
            starting_health: 10,
            wait_recovery: 0,
            ..GameConfig::default()
        }
        .with_total_days(3);
        let schedule = vec![EventKind::Meeting, EventKind::Meeting, EventKind::Meeting];
        let result = solve(&cfg, &schedule).unwrap();
        assert_eq!(result.bits(), "000");
        assert_eq!(evaluate_plan(&cfg, &schedule, &[Action::Wash; 3]), None);
    }

    #[test]
    fn empty_schedule_scores_zero() {
        let cfg = GameConfig::default();
        let result = solve_exhaustive(&cfg, &[]).unwrap();
        assert_eq!(result.best_score, 0);
        assert!(result.best_path.is_empty());
    }
}
