//! L4 Atomic Layer: Animation configuration and progress calculation
//!
//! An [`Animation`] is an immutable value: the builder methods consume it and
//! return a modified copy.

use super::controller::{Effect, Msg};
use super::easing::Easing;
use super::timing::{millis_to_duration, Millis};

/// Default animation duration in milliseconds
pub const DEFAULT_DURATION_MS: Millis = 1000.0;

/// Delay, duration and easing of a scroll animation
///
/// `duration` must be positive. It is not checked here: a zero duration makes
/// [`Animation::step`] divide by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    delay: Millis,
    duration: Millis,
    easing: Easing,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            delay: 0.0,
            duration: DEFAULT_DURATION_MS,
            easing: Easing::identity(),
        }
    }
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Millis) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_duration(mut self, duration: Millis) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn delay(&self) -> Millis {
        self.delay
    }

    pub fn duration(&self) -> Millis {
        self.duration
    }

    pub fn easing(&self) -> &Easing {
        &self.easing
    }

    /// Completion is judged on raw elapsed time, not eased progress
    #[inline]
    pub fn is_finished(&self, elapsed: Millis) -> bool {
        elapsed >= self.duration
    }

    /// Eased progress fraction for `elapsed` milliseconds
    #[inline]
    pub fn step(&self, elapsed: Millis) -> f64 {
        self.easing.apply(elapsed / self.duration)
    }

    /// Deliver `msg` once, after this animation's delay
    pub fn wait(&self, msg: Msg) -> Effect {
        Effect::Defer {
            after: millis_to_duration(self.delay),
            msg: Box::new(msg),
        }
    }
}
