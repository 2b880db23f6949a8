//! Centralized balance and tuning constants for Shampoo Strategist.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_TURN_SCORED: &str = "log.turn.scored";
pub(crate) const LOG_TURN_CHAOS: &str = "log.turn.chaos";
pub(crate) const LOG_HAIR_FRIED: &str = "log.turn.hair-fried";
pub(crate) const LOG_SCHEDULE_COMPLETE: &str = "log.turn.schedule-complete";
pub(crate) const LOG_ACTION_REJECTED: &str = "log.turn.action-rejected";
pub(crate) const LOG_SOLVER_DONE: &str = "log.solver.done";
pub(crate) const LOG_SCHEDULE_GENERATED: &str = "log.schedule.generated";

// Session defaults ---------------------------------------------------------
pub const DEFAULT_TOTAL_DAYS: u32 = 10;
pub const DEFAULT_STARTING_HEALTH: i32 = 100;
pub const DEFAULT_WASH_COST: i32 = 15;
pub const DEFAULT_WAIT_RECOVERY: i32 = 5;
pub const DEFAULT_STARTING_DAYS_SINCE_WASH: u32 = 2;
pub const DEFAULT_MAX_HEALTH: i32 = 100;
/// Upper bound for `max_health`, `wash_cost` and `wait_recovery`.
pub const HEALTH_FIELD_LIMIT: i32 = 10_000;

// Hair cycle ---------------------------------------------------------------
/// Days-since-wash values at or beyond this share the worst quality bucket.
pub const HAIR_CYCLE_MAX_BUCKET: u32 = 4;
pub const HAIR_QUALITY_MAX: u8 = 10;

// Scoring ------------------------------------------------------------------
pub(crate) const FRIED_HEALTH_THRESHOLD: i32 = 20;
pub(crate) const FRIED_QUALITY_CAP: u8 = 5;
pub(crate) const FRIZZ_HEALTH_THRESHOLD: i32 = 50;
pub(crate) const FRIZZ_QUALITY_CAP: u8 = 8;
pub(crate) const RAIN_PEAK_QUALITY: u8 = 6;
pub(crate) const HUMIDITY_FRESH_PENALTY: u8 = 2;
pub(crate) const WORKOUT_DIRTY_DAYS: u32 = 3;
pub(crate) const WORKOUT_DIRTY_BONUS: f64 = 15.0;

// Chaos roll ---------------------------------------------------------------
pub(crate) const CHAOS_RAIN_CHANCE: f64 = 0.1;
pub(crate) const CHAOS_HUMIDITY_CHANCE: f64 = 0.1;
pub(crate) const CHAOS_NONE_CHANCE: f64 = 0.8;

// Schedule -----------------------------------------------------------------
/// Meeting and Date are seeded into every schedule.
pub(crate) const SCHEDULE_GUARANTEED_EVENTS: u32 = 2;

// Solver -------------------------------------------------------------------
/// Largest horizon searched by brute force; longer games use the memoized search.
pub const EXHAUSTIVE_SOLVER_MAX_DAYS: u32 = 20;
/// Hard cap on any session length.
pub const MAX_TOTAL_DAYS: u32 = 365;

// Snapshot display ---------------------------------------------------------
pub(crate) const HEALTH_BAND_GOOD_ABOVE: i32 = 50;
pub(crate) const HEALTH_BAND_WARN_ABOVE: i32 = 20;

// Messages -----------------------------------------------------------------
pub const HAIR_FRIED_MESSAGE: &str = "Hair Fried! Game Over.";
pub const WASH_ACTION_LABEL: &str = "SHAMPOOING";
pub const WAIT_ACTION_LABEL: &str = "WAIT";
