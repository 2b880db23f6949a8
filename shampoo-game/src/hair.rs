//! Hair cycle quality curve keyed by days since the last wash.
use serde::Serialize;

use crate::constants::{HAIR_CYCLE_MAX_BUCKET, HAIR_QUALITY_MAX};

/// One row of the hair-quality curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HairCycleEntry {
    /// Base quality on a 0-10 scale.
    pub score: u8,
    pub description: &'static str,
    pub badge: &'static str,
}

static HAIR_CYCLE: [HairCycleEntry; 5] = [
    HairCycleEntry {
        score: 9,
        description: "Fresh and Clean ✨",
        badge: "Shampoo Day",
    },
    HairCycleEntry {
        score: 10,
        description: "Perfect balance",
        badge: "Peak (Day 1)",
    },
    HairCycleEntry {
        score: 7,
        description: "Lived-in texture",
        badge: "Good (Day 2)",
    },
    HairCycleEntry {
        score: 3,
        description: "Visibly dirty",
        badge: "Greasy (Day 3)",
    },
    HairCycleEntry {
        score: 1,
        description: "Oil slick",
        badge: "Gross (Day 4+)",
    },
];

/// Look up the curve entry, folding every value past the last bucket into it.
#[must_use]
pub fn hair_cycle_entry(days_since_wash: u32) -> &'static HairCycleEntry {
    let bucket = days_since_wash.min(HAIR_CYCLE_MAX_BUCKET) as usize;
    &HAIR_CYCLE[bucket]
}

/// Base quality score for a given number of days since washing.
#[must_use]
pub fn hair_quality(days_since_wash: u32) -> u8 {
    hair_cycle_entry(days_since_wash).score
}

/// Quality expressed as a percentage of the best possible look.
#[must_use]
pub fn look_percent(days_since_wash: u32) -> i32 {
    i32::from(hair_quality(days_since_wash)) * 100 / i32::from(HAIR_QUALITY_MAX)
}

/// Full curve, one entry per bucket, for front-ends that render the legend.
#[must_use]
pub fn hair_cycle_table() -> &'static [HairCycleEntry] {
    &HAIR_CYCLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_folds_into_last_bucket() {
        let worst = hair_cycle_entry(4);
        for days in 4..64 {
            assert_eq!(hair_cycle_entry(days), worst);
        }
        assert_eq!(hair_cycle_entry(u32::MAX), worst);
    }

    #[test]
    fn curve_peaks_the_day_after_washing() {
        let scores: Vec<u8> = (0..5).map(hair_quality).collect();
        assert_eq!(scores, vec![9, 10, 7, 3, 1]);
        assert!(
            hair_cycle_table()
                .iter()
                .all(|entry| entry.score <= HAIR_QUALITY_MAX)
        );
    }

    #[test]
    fn look_percent_scales_quality() {
        assert_eq!(look_percent(1), 100);
        assert_eq!(look_percent(2), 70);
        assert_eq!(look_percent(9), 10);
    }
}
