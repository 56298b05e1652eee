//! L3 Molecular Layer: Scroll controller state machine
//!
//! [`Status`] is either idle (`Waiting`) or driving a scroll (`Animating`).
//! It never touches a viewport itself. [`Status::update`] returns the next
//! status together with an [`Effect`] describing the side effect to perform,
//! and [`Status::subscriptions`] tells the host whether it should be feeding
//! frame deltas. The host executes effects and routes the resulting messages
//! back through `update`.

use std::time::Duration;

use tracing::debug;

use super::animation::Animation;
use super::easing::Easing;
use super::geometry::{Dimensions, Position, Target, Viewport};
use super::timing::{clamp, lerp, Millis};
use crate::error::ViewportError;

/// Progress of an in-flight scroll
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationData {
    /// Scene size captured when the animation started
    pub scene: Dimensions,
    pub to: Position,
    pub from: Position,
    pub animation: Animation,
    /// Accumulated frame deltas
    pub elapsed: Millis,
}

/// Controller state, threaded through every [`Status::update`] call
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// No scroll in progress; holds the configured animation
    Waiting(Animation),
    /// Scrolling `Target` toward `AnimationData::to`
    Animating(Target, AnimationData),
}

/// Messages the controller reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A viewport read requested by [`Status::scroll_to`] completed
    ViewportRead {
        target: Target,
        to: Position,
        result: Result<Viewport, ViewportError>,
    },
    /// The delay after a successful read has elapsed
    StartAnimation {
        target: Target,
        to: Position,
        viewport: Viewport,
    },
    /// Milliseconds since the previous animation frame
    FrameTick(Millis),
    /// Completion of a viewport write
    NoOp,
}

/// Side effects requested by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Read offset and scene size of `target`, answer with [`Msg::ViewportRead`]
    ReadViewport { target: Target, to: Position },
    /// Set the scroll offset of `target`, answer with [`Msg::NoOp`]
    SetViewport { target: Target, position: Position },
    /// Deliver `msg` once after `after` has passed
    Defer { after: Duration, msg: Box<Msg> },
}

impl Effect {
    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }
}

/// Event streams the host must keep open for the current status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscription {
    None,
    /// Per-animation-frame time deltas, delivered as [`Msg::FrameTick`]
    FrameDeltas,
}

impl Default for Status {
    fn default() -> Self {
        Status::Waiting(Animation::default())
    }
}

impl Status {
    pub fn new(animation: Animation) -> Self {
        Status::Waiting(animation)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        matches!(self, Status::Animating(..))
    }

    /// The animation in effect, whether idle or running
    pub fn animation(&self) -> &Animation {
        match self {
            Status::Waiting(animation) => animation,
            Status::Animating(_, data) => &data.animation,
        }
    }

    /// Surface currently being scrolled, if any
    pub fn target(&self) -> Option<&Target> {
        match self {
            Status::Waiting(_) => None,
            Status::Animating(target, _) => Some(target),
        }
    }

    fn into_animation(self) -> Animation {
        match self {
            Status::Waiting(animation) => animation,
            Status::Animating(_, data) => data.animation,
        }
    }

    /// Apply `f` to the configuration, only while idle
    fn configure(self, f: impl FnOnce(Animation) -> Animation) -> Self {
        match self {
            Status::Waiting(animation) => Status::Waiting(f(animation)),
            animating => animating,
        }
    }

    pub fn with_delay(self, delay: Millis) -> Self {
        self.configure(|a| a.with_delay(delay))
    }

    pub fn with_duration(self, duration: Millis) -> Self {
        self.configure(|a| a.with_duration(duration))
    }

    pub fn with_easing(self, easing: impl Into<Easing>) -> Self {
        let easing = easing.into();
        self.configure(|a| a.with_easing(easing))
    }

    /// Begin a scroll of `target` to `to`
    ///
    /// Only requests a viewport read; the status changes once the read and
    /// the configured delay have completed.
    pub fn scroll_to(&self, target: Target, to: Position) -> Effect {
        Effect::ReadViewport { target, to }
    }

    pub fn subscriptions(&self) -> Subscription {
        match self {
            Status::Waiting(_) => Subscription::None,
            Status::Animating(..) => Subscription::FrameDeltas,
        }
    }

    pub fn update(self, msg: Msg) -> (Status, Effect) {
        match msg {
            Msg::ViewportRead { target, to, result } => match result {
                Ok(viewport) => {
                    let effect = self
                        .animation()
                        .wait(Msg::StartAnimation { target, to, viewport });
                    (self, effect)
                }
                Err(e) => {
                    debug!(surface = %target, error = %e, "Viewport read failed, scroll aborted");
                    (self, Effect::None)
                }
            },
            Msg::StartAnimation {
                target,
                to,
                viewport,
            } => {
                if let Status::Animating(previous, _) = &self {
                    debug!(%previous, next = %target, "Replacing in-flight scroll");
                }
                debug!(surface = %target, from = ?viewport.offset, ?to, "Scroll animation started");
                let data = AnimationData {
                    scene: viewport.scene,
                    to,
                    from: viewport.offset,
                    animation: self.into_animation(),
                    elapsed: 0.0,
                };
                (Status::Animating(target, data), Effect::None)
            }
            Msg::FrameTick(delta) => self.tick(delta),
            Msg::NoOp => (self, Effect::None),
        }
    }

    fn tick(self, delta: Millis) -> (Status, Effect) {
        let (target, mut data) = match self {
            Status::Animating(target, data) => (target, data),
            waiting => return (waiting, Effect::None),
        };

        let time = delta + data.elapsed;
        if data.animation.is_finished(time) {
            // Snap to the exact destination instead of the last interpolated value
            debug!(surface = %target, to = ?data.to, "Scroll animation finished");
            let effect = Effect::SetViewport {
                target,
                position: data.to,
            };
            return (Status::Waiting(data.animation), effect);
        }

        let frac = data.animation.step(time);
        let position = Position {
            x: clamp(0.0, data.scene.width, lerp(data.from.x, data.to.x, frac)),
            y: clamp(0.0, data.scene.height, lerp(data.from.y, data.to.y, frac)),
        };
        data.elapsed = time;

        let effect = Effect::SetViewport {
            target: target.clone(),
            position,
        };
        (Status::Animating(target, data), effect)
    }
}
