use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::chaos::ChaosKind;
use crate::config::GameConfig;
use crate::constants::{
    HAIR_FRIED_MESSAGE, HEALTH_BAND_GOOD_ABOVE, HEALTH_BAND_WARN_ABOVE, WAIT_ACTION_LABEL,
    WASH_ACTION_LABEL,
};
use crate::events::EventKind;
use crate::hair::{HairCycleEntry, hair_cycle_entry, look_percent};
use crate::numbers::round_f64_to_i32;
use crate::turn::GameError;

/// Player intent for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Wash,
    Wait,
}

impl Action {
    /// Label recorded in the turn history.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wash => WASH_ACTION_LABEL,
            Self::Wait => WAIT_ACTION_LABEL,
        }
    }

    /// Solver bit encoding: 1 = wash, 0 = wait.
    #[must_use]
    pub const fn as_bit(self) -> u8 {
        match self {
            Self::Wash => 1,
            Self::Wait => 0,
        }
    }

    #[must_use]
    pub const fn from_bit(bit: bool) -> Self {
        if bit { Self::Wash } else { Self::Wait }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wash => f.write_str("wash"),
            Self::Wait => f.write_str("wait"),
        }
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wash" | "shampoo" => Ok(Self::Wash),
            "wait" => Ok(Self::Wait),
            _ => Err(GameError::UnknownAction(s.to_string())),
        }
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    #[default]
    Active,
    GameOver,
}

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// Every scheduled day was played
    Completed,
    /// Hair health reached zero or below
    HairFried,
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ending::Completed => write!(f, "completed"),
            Ending::HairFried => write!(f, "hair_fried"),
        }
    }
}

/// Why a submitted action ended the session without being scored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalReason {
    HairFried { day: u32, health: i32 },
}

impl TerminalReason {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::HairFried { .. } => HAIR_FRIED_MESSAGE,
        }
    }
}

/// One scored day of play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub day: u32,
    pub event: EventKind,
    pub action: Action,
    pub action_label: String,
    pub score: i32,
    pub health_after: i32,
    pub days_since_wash_after: u32,
    pub chaos: ChaosKind,
}

/// Mutable state of a single play-through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub current_day: u32,
    pub hair_health: i32,
    pub days_since_wash: u32,
    pub total_score: i32,
    pub schedule: Vec<EventKind>,
    pub history: Vec<TurnRecord>,
    pub phase: GamePhase,
    pub ending: Option<Ending>,
}

impl GameState {
    /// Fresh state at the configured starting values for a given schedule.
    #[must_use]
    pub fn new(config: &GameConfig, schedule: Vec<EventKind>) -> Self {
        Self {
            current_day: 0,
            hair_health: config.starting_health,
            days_since_wash: config.starting_days_since_wash,
            total_score: 0,
            schedule,
            history: Vec::new(),
            phase: GamePhase::Active,
            ending: None,
        }
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver)
    }

    /// Event scheduled for the day about to be played, if any remain.
    #[must_use]
    pub fn current_event(&self) -> Option<EventKind> {
        self.schedule.get(self.current_day as usize).copied()
    }

    /// Actions the player actually took, in order.
    #[must_use]
    pub fn player_path(&self) -> Vec<Action> {
        self.history.iter().map(|record| record.action).collect()
    }

    /// Daily scores in play order, for charting.
    #[must_use]
    pub fn score_series(&self) -> Vec<i32> {
        self.history.iter().map(|record| record.score).collect()
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot::from_state(self)
    }
}

/// Health bar coloring band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    Good,
    Warn,
    Bad,
}

impl HealthBand {
    #[must_use]
    pub const fn from_health(health: i32) -> Self {
        if health > HEALTH_BAND_GOOD_ABOVE {
            Self::Good
        } else if health > HEALTH_BAND_WARN_ABOVE {
            Self::Warn
        } else {
            Self::Bad
        }
    }
}

/// Forecast strip card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastCard {
    pub day: u32,
    pub event: EventKind,
    pub past: bool,
    pub active: bool,
}

/// Borrowed, read-only view of the game for presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot<'a> {
    pub current_day: u32,
    pub total_days: u32,
    pub day_label: String,
    pub hair_health: i32,
    pub health_band: HealthBand,
    pub days_since_wash: u32,
    pub hair: &'static HairCycleEntry,
    pub look_pct: i32,
    pub overall_quality_pct: i32,
    pub total_score: i32,
    pub current_event: Option<EventKind>,
    pub schedule: &'a [EventKind],
    pub forecast: Vec<ForecastCard>,
    pub history: &'a [TurnRecord],
    pub phase: GamePhase,
}

impl<'a> GameSnapshot<'a> {
    fn from_state(state: &'a GameState) -> Self {
        let total_days = u32::try_from(state.schedule.len()).unwrap_or(u32::MAX);
        let shown_day = (state.current_day + 1).min(total_days);
        let look_pct = look_percent(state.days_since_wash);
        let overall = round_f64_to_i32(f64::from(state.hair_health + look_pct) / 2.0);
        let forecast = state
            .schedule
            .iter()
            .zip(0_u32..)
            .map(|(&event, day)| ForecastCard {
                day,
                event,
                past: day < state.current_day,
                active: day == state.current_day,
            })
            .collect();

        Self {
            current_day: state.current_day,
            total_days,
            day_label: format!("{shown_day}/{total_days}"),
            hair_health: state.hair_health,
            health_band: HealthBand::from_health(state.hair_health),
            days_since_wash: state.days_since_wash,
            hair: hair_cycle_entry(state.days_since_wash),
            look_pct,
            overall_quality_pct: overall,
            total_score: state.total_score,
            current_event: state.current_event(),
            schedule: &state.schedule,
            forecast,
            history: &state.history,
            phase: state.phase,
        }
    }
}
