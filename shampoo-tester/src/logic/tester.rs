use colored::Colorize;
use serde::Serialize;
use shampoo_game::{Ending, GameConfig, Rating};
use std::time::{Duration, Instant};

use crate::logic::policy::GameplayStrategy;
use crate::logic::seeds::SeedInfo;
use crate::logic::simulation::{PlaythroughSummary, run_playthrough};

/// One finished playthrough, flattened for reports.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub policy: String,
    pub seed: u64,
    pub ending: Ending,
    pub final_score: i32,
    pub best_score: i32,
    pub efficiency_pct: Option<i32>,
    pub rating: Rating,
    pub days_played: u32,
    pub player_path: String,
    pub best_path: String,
}

impl RunRecord {
    fn from_summary(summary: &PlaythroughSummary) -> Self {
        let result = &summary.result;
        Self {
            policy: summary.strategy.label().to_string(),
            seed: summary.seed,
            ending: result.ending,
            final_score: result.final_score,
            best_score: result.solver.best_score,
            efficiency_pct: result.efficiency_pct,
            rating: result.rating,
            days_played: result.days_played,
            player_path: result
                .player_path
                .iter()
                .map(|action| char::from(b'0' + action.as_bit()))
                .collect(),
            best_path: result.solver.bits(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyResult {
    pub policy_name: String,
    pub strategy: GameplayStrategy,
    pub seed: u64,
    pub share_code: Option<String>,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    pub average_score: f64,
    pub average_best_score: f64,
    pub deaths: usize,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    pub runs: Vec<RunRecord>,
}

impl PolicyResult {
    /// Mean final score as a share of the mean optimum.
    #[must_use]
    pub fn efficiency(&self) -> Option<f64> {
        efficiency_pct(self.average_score, self.average_best_score)
    }
}

/// `score` as a percentage of `best`; `None` when nothing was achievable.
#[must_use]
pub fn efficiency_pct(score: f64, best: f64) -> Option<f64> {
    (best > 0.0).then(|| score / best * 100.0)
}

type Expectation = fn(&PlaythroughSummary) -> Result<(), String>;

const COMMON_EXPECTATIONS: [Expectation; 4] = [
    decisions_cover_history,
    history_matches_schedule,
    total_matches_daily_scores,
    solver_path_spans_schedule,
];

pub struct LogicTester {
    config: GameConfig,
    verbose: bool,
}

impl LogicTester {
    pub const fn new(config: GameConfig, verbose: bool) -> Self {
        Self { config, verbose }
    }

    pub fn run_policy(
        &self,
        strategy: GameplayStrategy,
        seeds: &[SeedInfo],
        iterations: usize,
    ) -> Vec<PolicyResult> {
        let mut results = Vec::new();

        for seed_info in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing policy: {} (seed: {} {})",
                    strategy.label().bright_white(),
                    seed_info.seed,
                    seed_info.share_code().as_deref().unwrap_or("-")
                );
            }

            results.push(self.run_single_policy(strategy, seed_info, iterations));
        }

        results
    }

    fn run_single_policy(
        &self,
        strategy: GameplayStrategy,
        seed_info: &SeedInfo,
        iterations: usize,
    ) -> PolicyResult {
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();
        let mut runs = Vec::with_capacity(iterations);
        let mut successes = 0;
        let mut deaths = 0;

        for i in 0..iterations {
            let start_time = Instant::now();
            let iteration_seed = seed_info
                .seed
                .wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));

            let summary = match run_playthrough(&self.config, strategy, iteration_seed) {
                Ok(summary) => summary,
                Err(err) => {
                    failures.push(format!("Iteration {} (seed {iteration_seed}): {err:#}", i + 1));
                    continue;
                }
            };
            performance_data.push(start_time.elapsed());
            log::debug!(
                "{} seed {iteration_seed}: score {} best {} chaos draws {}",
                strategy.key(),
                summary.result.final_score,
                summary.result.solver.best_score,
                summary.chaos_draws
            );
            if summary.fried() {
                deaths += 1;
            }
            runs.push(RunRecord::from_summary(&summary));

            if let Some(err) = evaluate_expectations(strategy, &summary) {
                let context = summarize_decision_path(&summary);
                failures.push(format!(
                    "Iteration {} (strategy {}, seed {}, days {}, ending '{}'): {} | {} | final health {} score {}",
                    i + 1,
                    strategy.label(),
                    summary.seed,
                    summary.result.days_played,
                    summary.ending_message,
                    err,
                    context,
                    summary.final_state.hair_health,
                    summary.result.final_score,
                ));

                if self.verbose {
                    println!(
                        "  ❌ Iteration {}/{} failed: {}",
                        i + 1,
                        iterations,
                        err.red()
                    );
                }
            } else {
                successes += 1;
                if self.verbose {
                    println!(
                        "  ✅ Iteration {}/{} passed score:{} best:{} ending:{}",
                        i + 1,
                        iterations,
                        summary.result.final_score,
                        summary.result.solver.best_score,
                        summary.ending_message
                    );
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        PolicyResult {
            policy_name: strategy.label().to_string(),
            strategy,
            seed: seed_info.seed,
            share_code: seed_info.share_code(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_score: mean(runs.iter().map(|r| r.final_score)),
            average_best_score: mean(runs.iter().map(|r| r.best_score)),
            deaths,
            average_duration,
            runs,
        }
    }
}

fn mean(values: impl Iterator<Item = i32>) -> f64 {
    let (sum, count) = values.fold((0_i64, 0_u32), |(sum, count), v| {
        (sum + i64::from(v), count + 1)
    });
    if count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let sum = sum as f64;
    sum / f64::from(count)
}

fn evaluate_expectations(strategy: GameplayStrategy, summary: &PlaythroughSummary) -> Option<String> {
    for expectation in COMMON_EXPECTATIONS {
        if let Err(err) = expectation(summary) {
            return Some(err);
        }
    }
    if strategy == GameplayStrategy::Oracle
        && let Err(err) = oracle_survives(summary)
    {
        return Some(err);
    }
    None
}

fn decisions_cover_history(summary: &PlaythroughSummary) -> Result<(), String> {
    let history = summary.final_state.history.len();
    let expected = history + usize::from(summary.fried());
    if summary.decisions.len() != expected {
        return Err(format!(
            "{} decisions for {history} scored days",
            summary.decisions.len()
        ));
    }
    if summary.result.ending == Ending::Completed && history != summary.final_state.schedule.len()
    {
        return Err(format!(
            "completed after {history} of {} days",
            summary.final_state.schedule.len()
        ));
    }
    Ok(())
}

fn history_matches_schedule(summary: &PlaythroughSummary) -> Result<(), String> {
    let state = &summary.final_state;
    for (idx, record) in state.history.iter().enumerate() {
        if record.day as usize != idx {
            return Err(format!("history entry {idx} is labelled day {}", record.day));
        }
        if state.schedule.get(idx) != Some(&record.event) {
            return Err(format!("day {} scored against the wrong event", idx + 1));
        }
        if record.score < 0 {
            return Err(format!("day {} scored {}", idx + 1, record.score));
        }
    }
    Ok(())
}

fn total_matches_daily_scores(summary: &PlaythroughSummary) -> Result<(), String> {
    let sum: i32 = summary.final_state.history.iter().map(|r| r.score).sum();
    if sum == summary.result.final_score {
        Ok(())
    } else {
        Err(format!(
            "total {} differs from daily sum {sum}",
            summary.result.final_score
        ))
    }
}

fn solver_path_spans_schedule(summary: &PlaythroughSummary) -> Result<(), String> {
    let expected = summary.final_state.schedule.len();
    let actual = summary.result.solver.best_path.len();
    if actual == expected {
        Ok(())
    } else {
        Err(format!("solver path covers {actual} of {expected} days"))
    }
}

fn oracle_survives(summary: &PlaythroughSummary) -> Result<(), String> {
    if summary.fried() {
        Err("oracle followed a plan that fried the hair".to_string())
    } else {
        Ok(())
    }
}

fn summarize_decision_path(summary: &PlaythroughSummary) -> String {
    if summary.decisions.is_empty() {
        return "no decisions recorded".to_string();
    }

    summary
        .decisions
        .iter()
        .rev()
        .take(3)
        .map(|entry| {
            let rationale = entry
                .rationale
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or("-");
            format!(
                "day {} ({}): {} [{}] reason {}",
                entry.day + 1,
                entry.event,
                entry.action,
                entry.policy_name,
                rationale
            )
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

mod duration_serde {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds() -> Vec<SeedInfo> {
        vec![SeedInfo::from_numeric(7), SeedInfo::from_numeric(1337)]
    }

    #[test]
    fn every_policy_passes_default_rules() {
        let tester = LogicTester::new(GameConfig::default(), false);
        for strategy in GameplayStrategy::ALL {
            for result in tester.run_policy(strategy, &seeds(), 3) {
                assert!(result.passed, "{}: {:?}", result.policy_name, result.failures);
                assert_eq!(result.successful_iterations, 3);
                assert_eq!(result.runs.len(), 3);
            }
        }
    }

    #[test]
    fn oracle_replays_optimal_plans() {
        let tester = LogicTester::new(GameConfig::default(), false);
        let oracle = tester.run_policy(GameplayStrategy::Oracle, &seeds(), 5);
        for result in &oracle {
            assert_eq!(result.deaths, 0);
            assert!(result.runs.iter().all(|r| r.player_path == r.best_path));
            assert!(result.efficiency().unwrap() > 0.0);
        }
    }

    #[test]
    fn fried_runs_still_satisfy_bookkeeping() {
        let cfg = GameConfig {
            starting_health: 20,
            wait_recovery: 0,
            ..GameConfig::default()
        };
        let tester = LogicTester::new(cfg, false);
        let results = tester.run_policy(GameplayStrategy::WashEveryThird, &seeds(), 2);
        for result in results {
            assert!(result.passed, "{:?}", result.failures);
            assert_eq!(result.deaths, 2);
            assert!(result.runs.iter().all(|r| r.rating == Rating::Disaster));
        }
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert!((mean(std::iter::empty()) - 0.0).abs() < f64::EPSILON);
        assert!((mean([1, 2].into_iter()) - 1.5).abs() < f64::EPSILON);
    }
}
