//! Smooth scrolling state machine
//!
//! Scrolls a viewport (the window or a named scrollable element) from its
//! current offset to a target offset over a configured delay, duration and
//! easing curve.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Easing curves (named and custom)
//! - `timing` - Interpolation and time conversion helpers
//! - `geometry` - Target, position, scene dimensions
//! - `animation` - Immutable animation configuration and progress
//!
//! ## L3 Molecular Layer
//! - `controller` - `Status` state machine, messages and effects
//!
//! # Usage
//!
//! ```ignore
//! use smoothscroll_core::scroll::{EasingType, Msg, Position, Status, Target};
//!
//! let status = Status::default()
//!     .with_duration(400.0)
//!     .with_easing(EasingType::Cubic);
//!
//! // Ask the host to read the window geometry
//! let effect = status.scroll_to(Target::Window, Position::new(0.0, 0.0));
//!
//! // Route every message the host produces back through update
//! let (status, effect) = status.update(Msg::FrameTick(16.0));
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod geometry;
pub mod timing;
pub mod animation;

// L3 Molecular Layer
pub mod controller;

pub use animation::Animation;
pub use controller::{AnimationData, Effect, Msg, Status, Subscription};
pub use easing::{Easing, EasingType};
pub use geometry::{Dimensions, Position, Target, Viewport};
pub use timing::Millis;
