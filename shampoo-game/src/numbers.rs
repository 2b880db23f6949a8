//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 half-up and clamp it to the i32 range, returning 0 for NaN values.
///
/// Scores are never negative, so `f64::round` (half away from zero) is
/// equivalent to half-up for every value the scoring path produces.
#[must_use]
pub fn round_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Integer percentage of `part / whole`, rounded; `None` when `whole` is not positive.
#[must_use]
pub fn percent_of(part: i32, whole: i32) -> Option<i32> {
    if whole <= 0 {
        return None;
    }
    let ratio = i64_to_f64(i64::from(part)) / i64_to_f64(i64::from(whole));
    Some(round_f64_to_i32(ratio * 100.0))
}
