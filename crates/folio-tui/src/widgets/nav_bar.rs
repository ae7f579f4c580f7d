use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct NavBarWidget;

impl NavBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let active = app.engine.active_link();
        let base = Style::default().fg(theme.fg0).bg(theme.bg2);

        let mut spans = vec![Span::styled(
            " folio ",
            base.fg(theme.accent).add_modifier(Modifier::BOLD),
        )];
        for (i, link) in app.engine.layout().nav.iter().enumerate() {
            let style = if active == Some(link.href.as_str()) {
                base.fg(theme.active).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                base
            };
            spans.push(Span::styled(" ", base));
            spans.push(Span::styled(format!("{}:{}", i + 1, link.label), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
    }
}
