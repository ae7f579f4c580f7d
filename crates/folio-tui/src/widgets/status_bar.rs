use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let engine = &app.engine;
        let viewport = engine.viewport();

        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => format!(
                " {:.0}/{:.0}px | {:.0}x{:.0} | {}",
                engine.position(),
                engine.controller().max_scroll(),
                viewport.width,
                viewport.height,
                if engine.is_idle() { "idle" } else { "moving" },
            ),
        };

        let help_hint = " q:quit j/k:scroll 1-9:nav p:pin t:theme ";
        let used = status_text.width() + help_hint.width();
        let padding = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
