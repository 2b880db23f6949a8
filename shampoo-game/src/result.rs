//! End game result calculation
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::numbers::percent_of;
use crate::solver::SolverResult;
use crate::state::{Action, Ending, GameState};

/// Rating band comparing the player's score with the retrospective optimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    /// Matched or beat the chaos-free optimum
    Flawless,
    Salon,
    Presentable,
    BadHairDay,
    /// Did not finish, or scored under a third of the optimum
    Disaster,
}

impl Rating {
    #[must_use]
    pub fn from_scores(ending: Ending, final_score: i32, best_score: i32) -> Self {
        if ending == Ending::HairFried {
            return Self::Disaster;
        }
        if final_score >= best_score {
            return Self::Flawless;
        }
        match percent_of(final_score, best_score).unwrap_or(0) {
            85.. => Self::Salon,
            60..=84 => Self::Presentable,
            33..=59 => Self::BadHairDay,
            _ => Self::Disaster,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flawless => "Flawless",
            Self::Salon => "Salon Ready",
            Self::Presentable => "Presentable",
            Self::BadHairDay => "Bad Hair Day",
            Self::Disaster => "Disaster",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete summary of a finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub ending: Ending,
    pub final_score: i32,
    pub solver: SolverResult,
    pub days_played: u32,
    pub player_path: Vec<Action>,
    pub score_series: Vec<i32>,
    /// Final score as a percentage of the optimum; `None` when the optimum is zero.
    pub efficiency_pct: Option<i32>,
    pub rating: Rating,
}

impl GameSummary {
    /// Build the summary from a finished state.
    ///
    /// A fried session is treated as ended on the fatal day, so
    /// `days_played` counts only scored days.
    #[must_use]
    pub fn new(state: &GameState, solver: SolverResult) -> Self {
        let ending = state.ending.unwrap_or(Ending::Completed);
        let final_score = state.total_score;
        Self {
            ending,
            final_score,
            days_played: state.current_day,
            player_path: state.player_path(),
            score_series: state.score_series(),
            efficiency_pct: percent_of(final_score, solver.best_score),
            rating: Rating::from_scores(ending, final_score, solver.best_score),
            solver,
        }
    }

    /// Points left on the table relative to the optimum. Negative when
    /// chaos happened to help the player.
    #[must_use]
    pub const fn missed_points(&self) -> i32 {
        self.solver.best_score - self.final_score
    }

    /// Days where the player's action differs from the optimal path.
    #[must_use]
    pub fn divergent_days(&self) -> Vec<usize> {
        self.player_path
            .iter()
            .zip(&self.solver.best_path)
            .enumerate()
            .filter(|(_, (played, best))| played != best)
            .map(|(day, _)| day)
            .collect()
    }
}
