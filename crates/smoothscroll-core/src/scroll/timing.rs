//! L4 Atomic Layer: Time and interpolation helpers for scroll animations

use std::time::Duration;

/// Milliseconds, fractional. Frame deltas arrive as fractions of a millisecond.
pub type Millis = f64;

/// Linear interpolation between two values
///
/// `t` is not clamped, so eased fractions outside [0, 1] extrapolate.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Clamp `value` into `[low, high]`
///
/// Unlike `f64::clamp` this never panics when `high < low` (an empty scene);
/// the lower bound wins.
#[inline]
pub fn clamp(low: f64, high: f64, value: f64) -> f64 {
    value.min(high).max(low)
}

/// Convert milliseconds to a `Duration` for scheduling
///
/// Negative and non-finite values become zero: a wait can't run backwards.
/// Values too large for a `u64` of nanoseconds saturate.
#[inline]
pub fn millis_to_duration(ms: Millis) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_nanos((ms * 1_000_000.0).round() as u64)
    } else {
        Duration::ZERO
    }
}

/// Measured frame interval for a target frame rate
///
/// Never shorter than 1ms, so rates above 1000fps run at 1000fps.
#[inline]
pub fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16) // ~60fps fallback
    } else {
        Duration::from_millis((1000 / fps as u64).max(1))
    }
}
