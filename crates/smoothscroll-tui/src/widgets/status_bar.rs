use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use smoothscroll_core::Status;

use crate::app::{easing_label, App};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let animation = app.status.animation();

        let (state, state_color) = match &app.status {
            Status::Waiting(_) => ("IDLE".to_string(), theme.idle),
            Status::Animating(target, data) => (
                format!("SCROLL {} {:.0}/{:.0}ms", target, data.elapsed, animation.duration()),
                theme.animating,
            ),
        };

        let settings = format!(
            " {}ms | delay {}ms | {} | y={:.1} ",
            animation.duration(),
            animation.delay(),
            easing_label(animation.easing()),
            app.panes.document.offset.y,
        );
        let message = app.status_message.clone().unwrap_or_default();

        let help_hint = " q:quit j/k:move enter:go g/G:top/bottom +/-:duration e:easing ";
        let used = state.len() + 2 + settings.len() + message.len() + help_hint.len();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", state),
                Style::default().fg(theme.bg0).bg(state_color),
            ),
            Span::styled(settings, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(message, Style::default().fg(theme.fg1).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
