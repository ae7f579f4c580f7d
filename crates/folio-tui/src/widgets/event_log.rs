use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub struct EventLogWidget;

impl EventLogWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" events ")
            .border_style(Style::default().fg(theme.grey))
            .style(Style::default().bg(theme.bg0));

        // Newest at the bottom
        let visible = area.height.saturating_sub(2) as usize;
        let skip = app.event_log.len().saturating_sub(visible);
        let lines: Vec<Line> = app
            .event_log
            .iter()
            .skip(skip)
            .map(|entry| Line::styled(entry.as_str(), Style::default().fg(theme.fg0)))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
