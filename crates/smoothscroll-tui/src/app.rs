use std::collections::VecDeque;
use std::time::{Duration, Instant};

use smoothscroll_core::scroll::{
    Animation, Dimensions, Easing, EasingType, Effect, Millis, Msg, Position, Status,
    Subscription, Target,
};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::document::Document;
use crate::event::EventHandler;
use crate::host::{TerminalViewport, TimerQueue, OUTLINE};
use crate::input::Action;
use crate::theme::Theme;

/// Step used by the duration keys
const DURATION_STEP_MS: Millis = 100.0;
/// Delay applied when the delay toggle is on
const TOGGLED_DELAY_MS: Millis = 250.0;

/// Host application: owns the controller status and executes its effects
pub struct App {
    pub document: Document,
    pub theme: Theme,
    pub panes: TerminalViewport,
    pub status: Status,
    pub timers: TimerQueue,
    pub outline_cursor: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Time of the previous frame while subscribed to frame deltas
    last_frame: Option<Instant>,
}

impl App {
    pub fn new(document: Document, animation: Animation, theme: Theme) -> Self {
        let mut panes = TerminalViewport::default();
        panes.document.scene = Dimensions::new(document.width() as f64, document.height() as f64);
        let outline_width = document
            .headings
            .iter()
            .map(|h| h.title.width() + h.level * 2)
            .max()
            .unwrap_or(0);
        panes.outline.scene = Dimensions::new(outline_width as f64, document.headings.len() as f64);

        Self {
            document,
            theme,
            panes,
            status: Status::new(animation),
            timers: TimerQueue::default(),
            outline_cursor: 0,
            status_message: None,
            should_quit: false,
            last_frame: None,
        }
    }

    /// Record the visible size of both panes after layout
    pub fn set_visible(&mut self, document: Dimensions, outline: Dimensions) {
        self.panes.document.visible = document;
        self.panes.outline.visible = outline;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn wants_frames(&self) -> bool {
        self.status.subscriptions() == Subscription::FrameDeltas
    }

    /// How long the event loop may block before the next frame or timer
    pub fn poll_timeout(&self, now: Instant, events: &EventHandler) -> Duration {
        if self.wants_frames() {
            return events.animation_tick_rate();
        }
        match self.timers.next_deadline() {
            Some(deadline) => deadline
                .saturating_duration_since(now)
                .min(events.tick_rate()),
            None => events.tick_rate(),
        }
    }

    /// Run `msg` and every message its effects produce synchronously
    pub fn dispatch(&mut self, msg: Msg, now: Instant) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let status = std::mem::take(&mut self.status);
            let (status, effect) = status.update(msg);
            self.status = status;
            self.run_effect(effect, now, &mut queue);
        }
    }

    fn run_effect(&mut self, effect: Effect, now: Instant, queue: &mut VecDeque<Msg>) {
        match effect {
            Effect::None => {}
            Effect::ReadViewport { target, to } => {
                let result = self.panes.read(&target);
                queue.push_back(Msg::ViewportRead { target, to, result });
            }
            Effect::SetViewport { target, position } => {
                if let Err(e) = self.panes.write(&target, position) {
                    debug!(surface = %target, error = %e, "Pane write failed");
                }
                queue.push_back(Msg::NoOp);
            }
            Effect::Defer { after, msg } => {
                self.timers.push(now + after, *msg);
            }
        }
    }

    /// Start a smooth scroll of `target`
    pub fn scroll_to(&mut self, target: Target, to: Position, now: Instant) {
        let effect = self.status.scroll_to(target, to);
        let mut queue = VecDeque::new();
        self.run_effect(effect, now, &mut queue);
        while let Some(msg) = queue.pop_front() {
            self.dispatch(msg, now);
        }
    }

    /// Deliver deferred messages whose deadline has passed
    pub fn fire_timers(&mut self, now: Instant) {
        for msg in self.timers.pop_due(now) {
            self.dispatch(msg, now);
        }
    }

    /// Follow the frame subscription and deliver the delta since the last frame
    pub fn sync_frames(&mut self, now: Instant) {
        match (self.status.subscriptions(), self.last_frame) {
            (Subscription::FrameDeltas, None) => {
                self.last_frame = Some(now);
            }
            (Subscription::FrameDeltas, Some(last)) => {
                let delta = now.saturating_duration_since(last).as_secs_f64() * 1000.0;
                if delta > 0.0 {
                    self.last_frame = Some(now);
                    self.dispatch(Msg::FrameTick(delta), now);
                    if !self.wants_frames() {
                        self.last_frame = None;
                    }
                }
            }
            (Subscription::None, Some(_)) => {
                self.last_frame = None;
            }
            (Subscription::None, None) => {}
        }
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveDown => self.move_cursor(1),
            Action::MoveUp => self.move_cursor(-1),
            Action::Select => {
                if let Some(heading) = self.document.headings.get(self.outline_cursor) {
                    let y = (heading.line as f64).min(self.panes.document.max_scroll_y());
                    let title = heading.title.clone();
                    self.set_status(format!("Scrolling to \"{}\"", title));
                    self.scroll_to(Target::Window, Position::new(0.0, y), now);
                }
            }
            Action::JumpToTop => {
                self.scroll_to(Target::Window, Position::new(0.0, 0.0), now);
            }
            Action::JumpToBottom => {
                let y = self.panes.document.max_scroll_y();
                self.scroll_to(Target::Window, Position::new(0.0, y), now);
            }
            Action::OutlinePageDown => self.page_outline(1.0, now),
            Action::OutlinePageUp => self.page_outline(-1.0, now),
            Action::LongerDuration => {
                let duration = self.status.animation().duration() + DURATION_STEP_MS;
                self.configure(|s| s.with_duration(duration));
            }
            Action::ShorterDuration => {
                let duration = (self.status.animation().duration() - DURATION_STEP_MS)
                    .max(DURATION_STEP_MS);
                self.configure(|s| s.with_duration(duration));
            }
            Action::CycleEasing => {
                let next = match self.status.animation().easing() {
                    Easing::Named(kind) => kind.next(),
                    Easing::Custom(_) => EasingType::Linear,
                };
                self.configure(|s| s.with_easing(next));
            }
            Action::ToggleDelay => {
                let delay = if self.status.animation().delay() > 0.0 {
                    0.0
                } else {
                    TOGGLED_DELAY_MS
                };
                self.configure(|s| s.with_delay(delay));
            }
            Action::ScrollMissing => {
                self.set_status("Scrolling #missing");
                self.scroll_to(Target::element("missing"), Position::new(0.0, 10.0), now);
            }
            Action::None => {}
        }
    }

    /// Configuration only changes while idle
    fn configure(&mut self, f: impl FnOnce(Status) -> Status) {
        if self.status.is_animating() {
            self.set_status("Busy: settings change once the scroll finishes");
            return;
        }
        let status = std::mem::take(&mut self.status);
        self.status = f(status);
        let animation = self.status.animation();
        let message = format!(
            "duration {}ms, delay {}ms, easing {}",
            animation.duration(),
            animation.delay(),
            easing_label(animation.easing())
        );
        self.set_status(message);
    }

    fn move_cursor(&mut self, step: isize) {
        let count = self.document.headings.len();
        if count == 0 {
            return;
        }
        let next = (self.outline_cursor as isize + step).clamp(0, count as isize - 1);
        self.outline_cursor = next as usize;

        // Keep the cursor row inside the outline pane without animating
        let pane = &mut self.panes.outline;
        let row = self.outline_cursor as f64;
        let visible = pane.visible.height.max(1.0);
        if row < pane.offset.y {
            pane.offset.y = row;
        } else if row >= pane.offset.y + visible {
            pane.offset.y = row - visible + 1.0;
        }
    }

    fn page_outline(&mut self, direction: f64, now: Instant) {
        let pane = self.panes.outline;
        let y = (pane.offset.y + direction * pane.visible.height.max(1.0))
            .clamp(0.0, pane.max_scroll_y());
        self.scroll_to(Target::element(OUTLINE), Position::new(0.0, y), now);
    }
}

pub fn easing_label(easing: &Easing) -> String {
    match easing {
        Easing::Named(kind) => kind.to_string(),
        Easing::Custom(_) => "custom".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(animation: Animation) -> App {
        let mut app = App::new(Document::sample(), animation, Theme::default());
        app.set_visible(Dimensions::new(80.0, 20.0), Dimensions::new(30.0, 4.0));
        app
    }

    fn ms(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn test_select_animates_to_heading() {
        let start = Instant::now();
        let mut app = app(Animation::default());
        app.outline_cursor = 2;
        let target_line = app.document.headings[2].line as f64;

        app.handle_action(Action::Select, start);
        assert!(!app.status.is_animating());
        app.fire_timers(start);
        assert!(app.status.is_animating());

        app.sync_frames(start);
        app.sync_frames(ms(start, 500));
        let half = app.panes.document.offset.y;
        assert!((half - target_line / 2.0).abs() < 1e-6);

        app.sync_frames(ms(start, 1100));
        assert_eq!(app.panes.document.offset, Position::new(0.0, target_line));
        assert!(!app.status.is_animating());
        assert!(!app.wants_frames());
    }

    #[test]
    fn test_delay_defers_start() {
        let start = Instant::now();
        let mut app = app(Animation::default().with_delay(250.0));
        app.handle_action(Action::JumpToBottom, start);

        app.fire_timers(ms(start, 100));
        assert!(!app.status.is_animating());
        app.fire_timers(ms(start, 250));
        assert!(app.status.is_animating());
    }

    #[test]
    fn test_missing_element_changes_nothing() {
        let start = Instant::now();
        let mut app = app(Animation::default());
        let before = app.panes.clone();

        app.handle_action(Action::ScrollMissing, start);
        assert!(app.timers.is_empty());
        assert_eq!(app.status, Status::default());
        assert_eq!(app.panes.document, before.document);
        assert_eq!(app.panes.outline, before.outline);
    }

    #[test]
    fn test_configuration_ignored_while_animating() {
        let start = Instant::now();
        let mut app = app(Animation::default());
        app.handle_action(Action::LongerDuration, start);
        assert_eq!(app.status.animation().duration(), 1100.0);

        app.handle_action(Action::JumpToBottom, start);
        app.fire_timers(start);
        app.handle_action(Action::LongerDuration, start);
        app.handle_action(Action::CycleEasing, start);
        assert_eq!(app.status.animation().duration(), 1100.0);
        assert_eq!(app.status.animation().easing(), &Easing::identity());
    }

    #[test]
    fn test_outline_page_scrolls_element() {
        let start = Instant::now();
        let mut app = app(Animation::default().with_duration(100.0));
        app.handle_action(Action::OutlinePageDown, start);
        app.fire_timers(start);
        assert_eq!(app.status.target(), Some(&Target::element(OUTLINE)));

        app.sync_frames(start);
        app.sync_frames(ms(start, 200));
        assert_eq!(app.panes.outline.offset.y, 4.0);
    }

    #[test]
    fn test_cursor_stays_visible() {
        let mut app = app(Animation::default());
        for _ in 0..6 {
            app.handle_action(Action::MoveDown, Instant::now());
        }
        assert_eq!(app.outline_cursor, 6);
        assert_eq!(app.panes.outline.offset.y, 3.0);
        for _ in 0..10 {
            app.handle_action(Action::MoveUp, Instant::now());
        }
        assert_eq!(app.outline_cursor, 0);
        assert_eq!(app.panes.outline.offset.y, 0.0);
    }

    #[test]
    fn test_poll_timeout_prefers_frames_and_timers() {
        let start = Instant::now();
        let events = EventHandler::with_animation_fps(100, 60);
        let mut app = app(Animation::default().with_delay(40.0));
        assert_eq!(app.poll_timeout(start, &events), Duration::from_millis(100));

        app.handle_action(Action::JumpToBottom, start);
        assert_eq!(app.poll_timeout(start, &events), Duration::from_millis(40));

        app.fire_timers(ms(start, 40));
        assert_eq!(app.poll_timeout(start, &events), Duration::from_millis(16));
    }
}
