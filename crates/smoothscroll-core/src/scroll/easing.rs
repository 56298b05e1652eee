//! L4 Atomic Layer: Easing curves for scroll animations
//!
//! An easing curve maps normalized elapsed time to normalized motion
//! progress. Inputs are not clamped here: callers may pass values past 1.0
//! and curves such as [`EasingType::Back`] overshoot 1.0 on their own.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Named easing curves usable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Identity: f(t) = t
    #[default]
    Linear,
    /// Cubic ease-out
    Cubic,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
    /// Cubic ease-in-out
    EaseInOut,
    /// Ease-out-back, overshoots before settling
    Back,
}

impl EasingType {
    pub const ALL: [EasingType; 6] = [
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
        EasingType::EaseInOut,
        EasingType::Back,
    ];

    /// Apply the curve to a progress value
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            EasingType::Linear => t,
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::Quintic => quintic_ease_out(t),
            EasingType::EaseOut => exponential_ease_out(t),
            EasingType::EaseInOut => cubic_ease_in_out(t),
            EasingType::Back => back_ease_out(t),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EasingType::Linear => "linear",
            EasingType::Cubic => "cubic",
            EasingType::Quintic => "quintic",
            EasingType::EaseOut => "ease-out",
            EasingType::EaseInOut => "ease-in-out",
            EasingType::Back => "back",
        }
    }

    /// The next curve in [`EasingType::ALL`], wrapping around
    pub fn next(&self) -> EasingType {
        let idx = Self::ALL.iter().position(|e| e == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for EasingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EasingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown easing '{}'", s))
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[inline]
fn cubic_ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let p = -2.0 * t + 2.0;
        1.0 - p * p * p / 2.0
    }
}

/// Ease-out-back with the usual 1.70158 overshoot constant
#[inline]
fn back_ease_out(t: f64) -> f64 {
    const C1: f64 = 1.70158;
    const C3: f64 = C1 + 1.0;
    let p = t - 1.0;
    1.0 + C3 * p * p * p + C1 * p * p
}

/// An easing curve: either a named curve or an arbitrary pure function
#[derive(Clone)]
pub enum Easing {
    Named(EasingType),
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl Easing {
    pub fn identity() -> Self {
        Easing::Named(EasingType::Linear)
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Easing::Custom(Arc::new(f))
    }

    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Named(kind) => kind.apply(t),
            Easing::Custom(f) => f(t),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<EasingType> for Easing {
    fn from(kind: EasingType) -> Self {
        Easing::Named(kind)
    }
}

// Closures have no structural equality, so custom curves compare by identity.
impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Easing::Named(a), Easing::Named(b)) => a == b,
            (Easing::Custom(a), Easing::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Named(kind) => write!(f, "Easing::Named({})", kind),
            Easing::Custom(_) => f.write_str("Easing::Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_boundaries() {
        for easing in EasingType::ALL {
            assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in [
            EasingType::Linear,
            EasingType::Cubic,
            EasingType::Quintic,
            EasingType::EaseOut,
            EasingType::EaseInOut,
        ] {
            let mut prev = 0.0;
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_back_overshoots() {
        let peak = (1..10)
            .map(|i| EasingType::Back.apply(i as f64 / 10.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_linear_does_not_clamp() {
        assert_eq!(EasingType::Linear.apply(1.5), 1.5);
        assert_eq!(Easing::identity().apply(-0.25), -0.25);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("ease-in-out".parse::<EasingType>(), Ok(EasingType::EaseInOut));
        assert_eq!("Cubic".parse::<EasingType>(), Ok(EasingType::Cubic));
        assert!("bounce".parse::<EasingType>().is_err());
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(EasingType::Back.next(), EasingType::Linear);
        assert_eq!(EasingType::Linear.next(), EasingType::Cubic);
    }

    #[test]
    fn test_custom_equality_by_identity() {
        let a = Easing::custom(|t| t * t);
        let b = a.clone();
        let c = Easing::custom(|t| t * t);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(Easing::default(), Easing::Named(EasingType::Linear));
    }
}
