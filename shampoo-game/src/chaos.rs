//! Daily chaos rolls that perturb the score
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{CHAOS_HUMIDITY_CHANCE, CHAOS_NONE_CHANCE, CHAOS_RAIN_CHANCE};

/// Random weather-style outcome applied to a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChaosKind {
    Rain,
    Humidity,
    #[default]
    None,
}

/// Static description of a chaos outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChaosOutcome {
    pub id: ChaosKind,
    pub probability: f64,
    pub message: &'static str,
    pub icon: &'static str,
}

static CHAOS_TABLE: [ChaosOutcome; 3] = [
    ChaosOutcome {
        id: ChaosKind::Rain,
        probability: CHAOS_RAIN_CHANCE,
        message: "Sudden downpour! Perfect hair ruined.",
        icon: "🌧️",
    },
    ChaosOutcome {
        id: ChaosKind::Humidity,
        probability: CHAOS_HUMIDITY_CHANCE,
        message: "High humidity! It puffed up.",
        icon: "🌫️",
    },
    ChaosOutcome {
        id: ChaosKind::None,
        probability: CHAOS_NONE_CHANCE,
        message: "",
        icon: "",
    },
];

impl ChaosKind {
    #[must_use]
    pub fn outcome(self) -> &'static ChaosOutcome {
        match self {
            Self::Rain => &CHAOS_TABLE[0],
            Self::Humidity => &CHAOS_TABLE[1],
            Self::None => &CHAOS_TABLE[2],
        }
    }

    /// Map a uniform draw in `[0, 1)` onto the cumulative chaos weights.
    #[must_use]
    pub fn from_draw(r: f64) -> Self {
        if r < CHAOS_RAIN_CHANCE {
            Self::Rain
        } else if r < CHAOS_RAIN_CHANCE + CHAOS_HUMIDITY_CHANCE {
            Self::Humidity
        } else {
            Self::None
        }
    }

    /// Whether the collaborator should surface a notice for this outcome.
    #[must_use]
    pub const fn is_notable(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Chaos catalog in roll order.
#[must_use]
pub fn chaos_table() -> &'static [ChaosOutcome] {
    &CHAOS_TABLE
}

/// Roll today's chaos from the supplied stream.
pub fn roll_chaos<R: Rng + ?Sized>(rng: &mut R) -> ChaosKind {
    ChaosKind::from_draw(rng.r#gen::<f64>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn probabilities_sum_to_one() {
        let total: f64 = chaos_table().iter().map(|c| c.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn draw_thresholds_match_weights() {
        assert_eq!(ChaosKind::from_draw(0.0), ChaosKind::Rain);
        assert_eq!(ChaosKind::from_draw(0.099), ChaosKind::Rain);
        assert_eq!(ChaosKind::from_draw(0.1), ChaosKind::Humidity);
        assert_eq!(ChaosKind::from_draw(0.199), ChaosKind::Humidity);
        assert_eq!(ChaosKind::from_draw(0.2), ChaosKind::None);
        assert_eq!(ChaosKind::from_draw(0.999), ChaosKind::None);
    }

    #[test]
    fn roll_frequencies_track_weights() {
        let mut rng = SmallRng::seed_from_u64(0x5EED);
        let mut counts = [0_u32; 3];
        let rolls = 20_000;
        for _ in 0..rolls {
            match roll_chaos(&mut rng) {
                ChaosKind::Rain => counts[0] += 1,
                ChaosKind::Humidity => counts[1] += 1,
                ChaosKind::None => counts[2] += 1,
            }
        }
        let rain = f64::from(counts[0]) / f64::from(rolls);
        let humidity = f64::from(counts[1]) / f64::from(rolls);
        assert!((rain - 0.1).abs() < 0.02, "rain frequency {rain}");
        assert!((humidity - 0.1).abs() < 0.02, "humidity frequency {humidity}");
    }

    #[test]
    fn none_has_no_notice() {
        assert!(!ChaosKind::None.is_notable());
        assert!(ChaosKind::None.outcome().message.is_empty());
        assert!(ChaosKind::Rain.is_notable());
    }
}
