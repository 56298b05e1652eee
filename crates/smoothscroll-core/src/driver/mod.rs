//! Tokio host runtime for the scroll controller
//!
//! The controller only describes effects. [`ScrollDriver`] performs them
//! against a [`ViewportHost`], schedules deferred messages and delivers frame
//! deltas while the controller asks for them.

mod host;
mod service;

pub use host::{MemoryViewport, ViewportHost};
pub use service::{Configure, DriverCommand, DriverEvent, ScrollDriver, ScrollHandle};
