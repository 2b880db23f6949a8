use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use shampoo_game::{Action, EventKind, GameConfig, GameState, solve};

/// Decision returned by a [`PlayerPolicy`]
#[derive(Debug, Clone)]
pub struct PolicyDecision {
    pub action: Action,
    pub rationale: Option<String>,
}

impl PolicyDecision {
    #[must_use]
    pub fn new(action: Action, rationale: Option<String>) -> Self {
        Self { action, rationale }
    }
}

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Choose today's action.
    fn pick_action(&mut self, state: &GameState) -> PolicyDecision;
}

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameplayStrategy {
    AlwaysWait,
    WashEveryThird,
    HighStakes,
    Random,
    Oracle,
}

impl GameplayStrategy {
    pub const ALL: [Self; 5] = [
        Self::AlwaysWait,
        Self::WashEveryThird,
        Self::HighStakes,
        Self::Random,
        Self::Oracle,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GameplayStrategy::AlwaysWait => "Always Wait",
            GameplayStrategy::WashEveryThird => "Wash Every Third",
            GameplayStrategy::HighStakes => "High Stakes",
            GameplayStrategy::Random => "Random",
            GameplayStrategy::Oracle => "Oracle",
        }
    }

    /// Command-line key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            GameplayStrategy::AlwaysWait => "always-wait",
            GameplayStrategy::WashEveryThird => "wash-every-third",
            GameplayStrategy::HighStakes => "high-stakes",
            GameplayStrategy::Random => "random",
            GameplayStrategy::Oracle => "oracle",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            GameplayStrategy::AlwaysWait => "Never washes; hair rides the grease curve",
            GameplayStrategy::WashEveryThird => "Washes on days 1, 4, 7, ...",
            GameplayStrategy::HighStakes => {
                "Washes the day before a Meeting or Date when health allows"
            }
            GameplayStrategy::Random => "Coin flip each day (seeded)",
            GameplayStrategy::Oracle => "Replays the chaos-free optimal plan",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Build a fresh policy for one playthrough.
    ///
    /// The oracle solves the schedule up front; the random policy draws from
    /// its own stream so game chaos stays untouched.
    #[must_use]
    pub fn create_policy(
        self,
        seed: u64,
        config: &GameConfig,
        schedule: &[EventKind],
    ) -> Box<dyn PlayerPolicy + Send> {
        match self {
            GameplayStrategy::AlwaysWait => Box::new(AlwaysWaitPolicy),
            GameplayStrategy::WashEveryThird => Box::new(WashEveryThirdPolicy),
            GameplayStrategy::HighStakes => Box::new(HighStakesPolicy {
                wash_cost: config.wash_cost,
            }),
            GameplayStrategy::Random => Box::new(RandomPolicy::new(seed)),
            GameplayStrategy::Oracle => Box::new(OraclePolicy::new(config, schedule)),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct AlwaysWaitPolicy;
struct WashEveryThirdPolicy;

struct HighStakesPolicy {
    wash_cost: i32,
}

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

struct OraclePolicy {
    path: Vec<Action>,
}

impl OraclePolicy {
    fn new(config: &GameConfig, schedule: &[EventKind]) -> Self {
        let path = match solve(config, schedule) {
            Ok(result) => result.best_path,
            Err(err) => {
                log::warn!("oracle has no plan, falling back to waiting: {err}");
                Vec::new()
            }
        };
        Self { path }
    }
}

impl PlayerPolicy for AlwaysWaitPolicy {
    fn name(&self) -> &'static str {
        "Always Wait"
    }

    fn pick_action(&mut self, _state: &GameState) -> PolicyDecision {
        PolicyDecision::new(Action::Wait, None)
    }
}

impl PlayerPolicy for WashEveryThirdPolicy {
    fn name(&self) -> &'static str {
        "Wash Every Third"
    }

    fn pick_action(&mut self, state: &GameState) -> PolicyDecision {
        if state.current_day % 3 == 0 {
            PolicyDecision::new(Action::Wash, Some("wash day".to_string()))
        } else {
            PolicyDecision::new(Action::Wait, None)
        }
    }
}

impl PlayerPolicy for HighStakesPolicy {
    fn name(&self) -> &'static str {
        "High Stakes"
    }

    fn pick_action(&mut self, state: &GameState) -> PolicyDecision {
        let tomorrow = state.schedule.get(state.current_day as usize + 1).copied();
        match tomorrow {
            Some(event) if event.is_high_stakes() && state.hair_health > self.wash_cost => {
                PolicyDecision::new(Action::Wash, Some(format!("peak for {event}")))
            }
            Some(event) if event.is_high_stakes() => {
                PolicyDecision::new(Action::Wait, Some("too fragile to wash".to_string()))
            }
            _ => PolicyDecision::new(Action::Wait, None),
        }
    }
}

impl PlayerPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn pick_action(&mut self, _state: &GameState) -> PolicyDecision {
        let action = Action::from_bit(self.rng.gen_bool(0.5));
        PolicyDecision::new(action, None)
    }
}

impl PlayerPolicy for OraclePolicy {
    fn name(&self) -> &'static str {
        "Oracle"
    }

    fn pick_action(&mut self, state: &GameState) -> PolicyDecision {
        let day = state.current_day as usize;
        match self.path.get(day) {
            Some(action) => PolicyDecision::new(*action, Some(format!("plan day {}", day + 1))),
            None => PolicyDecision::new(Action::Wait, Some("off plan".to_string())),
        }
    }
}
