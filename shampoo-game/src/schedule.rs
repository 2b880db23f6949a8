//! Day-by-day event schedule generation.
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::GameConfig;
use crate::constants::LOG_SCHEDULE_GENERATED;
use crate::events::EventKind;

/// Build a schedule of `config.total_days` events.
///
/// One Meeting and one Date are always present; the remaining days are drawn
/// uniformly with replacement and the whole sequence is Fisher–Yates shuffled.
/// `config` is expected to have passed validation, so at least two days exist.
pub fn generate_schedule<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Vec<EventKind> {
    let days = config.day_count();
    let mut schedule = Vec::with_capacity(days);
    schedule.push(EventKind::Meeting);
    schedule.push(EventKind::Date);

    while schedule.len() < days {
        let idx = rng.gen_range(0..EventKind::ALL.len());
        schedule.push(EventKind::ALL[idx]);
    }
    schedule.truncate(days);

    schedule.shuffle(rng);
    log::debug!("{LOG_SCHEDULE_GENERATED}: {schedule:?}");
    schedule
}

/// Check the coverage guarantee every generated schedule upholds.
#[must_use]
pub fn has_required_events(schedule: &[EventKind]) -> bool {
    schedule.contains(&EventKind::Meeting) && schedule.contains(&EventKind::Date)
}
