//! Terminal panes as scroll targets, plus the deferred-message queue

use std::time::Instant;

use smoothscroll_core::scroll::{Dimensions, Msg, Position, Target, Viewport};
use smoothscroll_core::ViewportError;

/// Name of the outline pane when used as a scroll target
pub const OUTLINE: &str = "outline";

/// Scroll state of one pane, in terminal cells
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pane {
    pub offset: Position,
    pub scene: Dimensions,
    /// Visible area from the last render
    pub visible: Dimensions,
}

impl Pane {
    /// Largest useful vertical offset
    pub fn max_scroll_y(&self) -> f64 {
        (self.scene.height - self.visible.height).max(0.0)
    }

    /// Offset in whole rows/columns for rendering
    pub fn scroll_cells(&self) -> (u16, u16) {
        let y = self.offset.y.round().clamp(0.0, u16::MAX as f64) as u16;
        let x = self.offset.x.round().clamp(0.0, u16::MAX as f64) as u16;
        (y, x)
    }
}

/// The two scrollable panes of the viewer
///
/// The document pane is the window; the outline pane is the element named
/// [`OUTLINE`]. Any other element name is not found.
#[derive(Debug, Clone, Default)]
pub struct TerminalViewport {
    pub document: Pane,
    pub outline: Pane,
}

impl TerminalViewport {
    pub fn pane(&self, target: &Target) -> Option<&Pane> {
        match target {
            Target::Window => Some(&self.document),
            Target::Element(name) if name == OUTLINE => Some(&self.outline),
            Target::Element(_) => None,
        }
    }

    pub fn pane_mut(&mut self, target: &Target) -> Option<&mut Pane> {
        match target {
            Target::Window => Some(&mut self.document),
            Target::Element(name) if name == OUTLINE => Some(&mut self.outline),
            Target::Element(_) => None,
        }
    }

    pub fn read(&self, target: &Target) -> Result<Viewport, ViewportError> {
        self.pane(target)
            .map(|pane| Viewport::new(pane.offset, pane.scene))
            .ok_or_else(|| not_found(target))
    }

    pub fn write(&mut self, target: &Target, position: Position) -> Result<(), ViewportError> {
        let pane = self.pane_mut(target).ok_or_else(|| not_found(target))?;
        pane.offset = position;
        Ok(())
    }
}

fn not_found(target: &Target) -> ViewportError {
    match target {
        Target::Window => ViewportError::Unavailable("window".to_string()),
        Target::Element(name) => ViewportError::ElementNotFound(name.clone()),
    }
}

/// One-shot messages waiting for their deadline
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<(Instant, Msg)>,
}

impl TimerQueue {
    pub fn push(&mut self, deadline: Instant, msg: Msg) {
        self.entries.push((deadline, msg));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|(deadline, _)| *deadline).min()
    }

    /// Remove and return every message due at `now`, earliest first
    pub fn pop_due(&mut self, now: Instant) -> Vec<Msg> {
        let mut due: Vec<(Instant, Msg)> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].0 <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, msg)| msg).collect()
    }
}
