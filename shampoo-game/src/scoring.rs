//! Daily score model shared by live play and the retrospective solver.
//!
//! The score for a day is the hair quality implied by days-since-wash,
//! capped by hair health, adjusted by the day's chaos, scaled by the event
//! multiplier and finally rounded half-up. Workouts reward dirty hair with a
//! flat bonus after scaling.

use crate::chaos::ChaosKind;
use crate::constants::{
    FRIED_HEALTH_THRESHOLD, FRIED_QUALITY_CAP, FRIZZ_HEALTH_THRESHOLD, FRIZZ_QUALITY_CAP,
    HUMIDITY_FRESH_PENALTY, RAIN_PEAK_QUALITY, WORKOUT_DIRTY_BONUS, WORKOUT_DIRTY_DAYS,
};
use crate::events::EventKind;
use crate::hair::hair_quality;
use crate::numbers::round_f64_to_i32;

/// Quality after health caps and chaos, before the event multiplier.
#[must_use]
pub fn adjusted_quality(days_since_wash: u32, health: i32, chaos: ChaosKind) -> u8 {
    let mut quality = hair_quality(days_since_wash);

    if health < FRIED_HEALTH_THRESHOLD {
        quality = quality.min(FRIED_QUALITY_CAP);
    } else if health < FRIZZ_HEALTH_THRESHOLD {
        quality = quality.min(FRIZZ_QUALITY_CAP);
    }

    match chaos {
        // Rain replaces whatever the health cap produced.
        ChaosKind::Rain if days_since_wash == 1 => quality = RAIN_PEAK_QUALITY,
        ChaosKind::Humidity if days_since_wash == 0 => {
            quality = quality.saturating_sub(HUMIDITY_FRESH_PENALTY);
        }
        _ => {}
    }

    quality
}

/// Score a single day. Pure; never negative.
#[must_use]
pub fn score_day(days_since_wash: u32, health: i32, event: EventKind, chaos: ChaosKind) -> i32 {
    let quality = adjusted_quality(days_since_wash, health, chaos);
    let mut raw = f64::from(quality) * event.multiplier();

    if event.has_dirty_hair_bonus() && days_since_wash >= WORKOUT_DIRTY_DAYS {
        raw += WORKOUT_DIRTY_BONUS;
    }

    round_f64_to_i32(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CHAOS: [ChaosKind; 3] = [ChaosKind::Rain, ChaosKind::Humidity, ChaosKind::None];

    #[test]
    fn healthy_peak_meeting_scores_thirty() {
        assert_eq!(score_day(1, 100, EventKind::Meeting, ChaosKind::None), 30);
        assert_eq!(score_day(0, 100, EventKind::Meeting, ChaosKind::None), 27);
    }

    #[test]
    fn health_caps_only_lower_quality() {
        assert_eq!(adjusted_quality(1, 49, ChaosKind::None), 8);
        assert_eq!(adjusted_quality(1, 19, ChaosKind::None), 5);
        assert_eq!(adjusted_quality(1, 50, ChaosKind::None), 10);
        assert_eq!(adjusted_quality(1, 20, ChaosKind::None), 8);
        // Already below the cap: untouched.
        assert_eq!(adjusted_quality(3, 10, ChaosKind::None), 3);
    }

    #[test]
    fn rain_overrides_health_cap_on_peak_day() {
        assert_eq!(adjusted_quality(1, 100, ChaosKind::Rain), 6);
        assert_eq!(adjusted_quality(1, 40, ChaosKind::Rain), 6);
        // The fried cap of 5 is replaced, not combined.
        assert_eq!(adjusted_quality(1, 10, ChaosKind::Rain), 6);
        // Rain off the peak day does nothing.
        assert_eq!(adjusted_quality(2, 100, ChaosKind::Rain), 7);
    }

    #[test]
    fn humidity_hits_fresh_hair_only() {
        assert_eq!(adjusted_quality(0, 100, ChaosKind::Humidity), 7);
        assert_eq!(adjusted_quality(0, 10, ChaosKind::Humidity), 3);
        assert_eq!(adjusted_quality(1, 100, ChaosKind::Humidity), 10);
    }

    #[test]
    fn workout_bonus_applies_after_multiplier() {
        assert_eq!(score_day(3, 100, EventKind::Workout, ChaosKind::None), 17);
        assert_eq!(score_day(7, 100, EventKind::Workout, ChaosKind::None), 16);
        assert_eq!(score_day(2, 100, EventKind::Workout, ChaosKind::None), 4);
        // Bonus is specific to workouts.
        assert_eq!(score_day(3, 100, EventKind::Chill, ChaosKind::None), 3);
    }

    #[test]
    fn rounding_is_half_up() {
        // 7 * 2.5 = 17.5
        assert_eq!(score_day(2, 100, EventKind::Date, ChaosKind::None), 18);
        // 3 * 1.5 = 4.5
        assert_eq!(score_day(3, 100, EventKind::Party, ChaosKind::None), 5);
        // 1 * 0.5 + 15 = 15.5
        assert_eq!(score_day(4, 100, EventKind::Workout, ChaosKind::None), 16);
    }

    #[test]
    fn pure_and_non_negative_across_inputs() {
        for days in 0..8 {
            for health in [-10, 0, 1, 19, 20, 49, 50, 100] {
                for event in EventKind::ALL {
                    for chaos in ALL_CHAOS {
                        let a = score_day(days, health, event, chaos);
                        let b = score_day(days, health, event, chaos);
                        assert_eq!(a, b);
                        assert!(a >= 0);
                    }
                }
            }
        }
    }
}
