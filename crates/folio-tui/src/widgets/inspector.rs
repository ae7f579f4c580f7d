use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;

/// Pin progress gauge and engine state
pub struct InspectorWidget;

impl InspectorWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let engine = &app.engine;

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" pin ")
            .border_style(Style::default().fg(theme.grey))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let label = Style::default().fg(theme.grey);
        let value = Style::default().fg(theme.fg1);

        let Some(pin) = engine.pin() else {
            frame.render_widget(
                Paragraph::new(Line::styled("no pinned section", label)),
                inner,
            );
            return;
        };
        let state = pin.state();

        let (mode, mode_color) = match (state.enabled, pin.suspension()) {
            (false, _) => ("flat".to_string(), theme.grey),
            (true, Some(s)) => (format!("suspended ({:?})", s).to_lowercase(), theme.suspended),
            (true, None) => ("pinned".to_string(), theme.pin),
        };

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(mode_color).bg(theme.bg2))
            .ratio(state.progress.clamp(0.0, 1.0))
            .label(format!("{:.0}%", state.progress * 100.0));
        frame.render_widget(gauge, rows[0]);

        let snaps = state
            .snap_points
            .iter()
            .map(|s| format!("{:.2}", s))
            .collect::<Vec<_>>()
            .join(" ");

        let lines = vec![
            Line::from(vec![
                Span::styled("mode      ", label),
                Span::styled(mode, Style::default().fg(mode_color).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("travel    ", label),
                Span::styled(format!("{:.0}px", state.total_travel), value),
            ]),
            Line::from(vec![
                Span::styled("translate ", label),
                Span::styled(format!("{:.0}px", pin.rendered_translation()), value),
            ]),
            Line::from(vec![
                Span::styled("snaps     ", label),
                Span::styled(if snaps.is_empty() { "-".to_string() } else { snaps }, value),
            ]),
            Line::from(vec![
                Span::styled("active    ", label),
                Span::styled(engine.active_link().unwrap_or("-").to_string(), value),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), rows[1]);
    }
}
