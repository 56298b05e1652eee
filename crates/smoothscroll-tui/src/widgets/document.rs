use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub struct DocumentWidget;

impl DocumentWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let border_style = if app.status.target() == Some(&smoothscroll_core::Target::Window) {
            Style::default().fg(theme.animating)
        } else {
            Style::default().fg(theme.grey0)
        };

        let block = Block::default()
            .title(" Document ")
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let heading_rows: Vec<usize> = app.document.headings.iter().map(|h| h.line).collect();
        let lines: Vec<Line> = app
            .document
            .lines
            .iter()
            .enumerate()
            .map(|(row, text)| {
                if heading_rows.contains(&row) {
                    Line::from(Span::styled(
                        text.as_str(),
                        Style::default()
                            .fg(theme.heading)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(text.as_str(), Style::default().fg(theme.fg0)))
                }
            })
            .collect();

        // No wrapping: one document line is one scroll row
        let paragraph = Paragraph::new(Text::from(lines)).scroll(app.panes.document.scroll_cells());
        frame.render_widget(paragraph, inner_area);
    }
}
