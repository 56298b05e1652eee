use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::host::OUTLINE;

pub struct OutlineWidget;

impl OutlineWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let animating_here = matches!(
            app.status.target(),
            Some(smoothscroll_core::Target::Element(name)) if name == OUTLINE
        );
        let border_style = if animating_here {
            Style::default().fg(theme.animating)
        } else {
            Style::default().fg(theme.accent)
        };

        let block = Block::default()
            .title(" Outline ")
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg1));

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        if app.document.headings.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No headings",
                Style::default().fg(theme.grey1),
            )));
            frame.render_widget(empty, inner_area);
            return;
        }

        let lines: Vec<Line> = app
            .document
            .headings
            .iter()
            .enumerate()
            .map(|(i, heading)| {
                let indent = "  ".repeat(heading.level.saturating_sub(1));
                let style = if i == app.outline_cursor {
                    Style::default()
                        .fg(theme.fg1)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg0)
                };
                Line::from(Span::styled(format!("{}{}", indent, heading.title), style))
            })
            .collect();

        let paragraph = Paragraph::new(lines).scroll(app.panes.outline.scroll_cells());
        frame.render_widget(paragraph, inner_area);
    }
}
