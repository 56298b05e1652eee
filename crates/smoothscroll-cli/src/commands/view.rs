use std::io;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};

use smoothscroll_core::{AppConfig, Dimensions};
use smoothscroll_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{DocumentWidget, OutlineWidget, StatusBarWidget},
    App, Document, Theme,
};

pub fn run(config: &AppConfig, file: Option<&Path>) -> Result<()> {
    config.animation.validate()?;

    let document = match file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Document::from_text(&text)
        }
        None => Document::sample(),
    };

    let mut app = App::new(document, config.animation.to_animation(), Theme::default());
    let events = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("smoothscroll"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &events);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        let now = Instant::now();
        app.fire_timers(now);
        app.sync_frames(now);

        terminal.draw(|frame| {
            let (document_area, outline_area, status_area) = split(frame.area());
            app.set_visible(inner_size(document_area), inner_size(outline_area));

            OutlineWidget::render(frame, outline_area, app);
            DocumentWidget::render(frame, document_area, app);
            StatusBarWidget::render(frame, status_area, app);
        })?;

        let timeout = app.poll_timeout(Instant::now(), events);
        if let Some(event) = events.next_within(timeout)? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key);
                    app.handle_action(action, Instant::now());
                }
                // Pane sizes are re-measured on the next draw
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Outline | document columns over a one-line status bar
fn split(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4), Constraint::Ratio(3, 4)])
        .split(rows[0]);
    (columns[1], columns[0], rows[1])
}

/// Area inside a bordered block
fn inner_size(area: Rect) -> Dimensions {
    Dimensions::new(
        area.width.saturating_sub(2) as f64,
        area.height.saturating_sub(2) as f64,
    )
}
