use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use folio_core::ScrollEngine;
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme::Theme;

/// Scaled rendering of what the page viewport shows
pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {:.0}px ", app.engine.position()))
            .border_style(Style::default().fg(theme.viewport))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let lines = page_lines(&app.engine, theme, inner.width, inner.height);
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Top of the viewport in flat layout coordinates
///
/// While pinned, the scrolled distance inside the pin range is consumed by
/// the track instead of moving the page.
pub fn visual_scroll(engine: &ScrollEngine) -> f64 {
    let position = engine.position();
    let Some(pin) = engine.pin() else {
        return position;
    };
    let travel = pin.spacing();
    let Some(top) = engine.geometry().rect(pin.region()).map(|r| r.top) else {
        return position;
    };

    if position <= top {
        position
    } else if position <= top + travel {
        top
    } else {
        position - travel
    }
}

fn page_lines(engine: &ScrollEngine, theme: &Theme, cols: u16, rows: u16) -> Vec<Line<'static>> {
    let viewport = engine.viewport();
    let flat = engine.layout().measure(0.0);
    let scroll = visual_scroll(engine);
    let px_per_row = viewport.height / f64::from(rows);
    let pin_region = engine.pin().filter(|p| p.state().enabled).map(|p| p.region());
    let active = engine.active_link();

    (0..rows)
        .map(|row| {
            let row_top = scroll + f64::from(row) * px_per_row;
            let y = row_top + px_per_row / 2.0;

            let Some((index, (id, rect))) = flat
                .rects()
                .enumerate()
                .find(|(_, (_, r))| y >= r.top && y < r.bottom())
            else {
                return Line::styled(" ".repeat(cols as usize), Style::default().bg(theme.bg0));
            };

            let bg = if index % 2 == 0 {
                theme.section_a
            } else {
                theme.section_b
            };

            if pin_region == Some(id) {
                let middle = y >= rect.top + rect.height / 2.0
                    && y < rect.top + rect.height / 2.0 + px_per_row;
                return track_line(engine, theme, cols, middle, bg);
            }

            let heading = row == 0 || (rect.top >= row_top && rect.top < row_top + px_per_row);
            let text = if heading {
                format!(" #{}", id)
            } else {
                String::new()
            };
            let is_active = active.and_then(|href| href.strip_prefix('#')) == Some(id);
            let mut style = Style::default().bg(bg).fg(theme.fg0);
            if is_active {
                style = style.fg(theme.active).add_modifier(Modifier::BOLD);
            }
            Line::styled(pad(text, cols), style)
        })
        .collect()
}

/// One row of the horizontal track, shifted by the rendered translation
fn track_line(engine: &ScrollEngine, theme: &Theme, cols: u16, label: bool, bg: Color) -> Line<'static> {
    let Some((_, track)) = engine.layout().pin_section() else {
        return Line::styled(" ".repeat(cols as usize), Style::default().bg(bg));
    };
    let translation = engine.pin().map_or(0.0, |p| p.rendered_translation());
    let panels = track.panel_count.max(1);
    let panel_width = track.track_width / panels as f64;
    let px_per_col = engine.viewport().width / f64::from(cols);

    let panel_at = |col: u16| -> Option<usize> {
        let x = (f64::from(col) + 0.5) * px_per_col - translation;
        let panel = (x / panel_width).floor();
        (panel >= 0.0 && (panel as usize) < panels).then_some(panel as usize)
    };

    let mut chars: Vec<char> = (0..cols)
        .map(|col| match (col.checked_sub(1).and_then(panel_at), panel_at(col)) {
            (Some(prev), Some(cur)) if prev != cur => '│',
            _ => ' ',
        })
        .collect();

    if label {
        for panel in 0..panels {
            let center = (panel as f64 + 0.5) * panel_width + translation;
            let col = (center / px_per_col).floor();
            if col >= 0.0 && (col as usize) < chars.len() {
                let text = format!("{}", panel + 1);
                for (offset, ch) in text.chars().enumerate() {
                    if let Some(slot) = chars.get_mut(col as usize + offset) {
                        *slot = ch;
                    }
                }
            }
        }
    }

    Line::from(Span::styled(
        chars.into_iter().collect::<String>(),
        Style::default().bg(bg).fg(theme.pin),
    ))
}

fn pad(mut text: String, cols: u16) -> String {
    let width = text.width();
    if width < cols as usize {
        text.push_str(&" ".repeat(cols as usize - width));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::layout::{PageLayout, Section, Viewport};
    use folio_core::AppConfig;
    use std::time::Duration;

    fn engine() -> ScrollEngine {
        let layout = PageLayout {
            viewport: Viewport::new(1000.0, 800.0),
            sections: vec![
                Section::new("home", 800.0),
                Section::pinned("projects", 800.0, 3000.0, 3),
                Section::new("contact", 800.0),
            ],
            nav: Vec::new(),
        };
        ScrollEngine::new(layout, AppConfig::default()).unwrap()
    }

    #[test]
    fn test_visual_scroll_holds_during_pin() {
        let mut engine = engine();
        engine.jump_to(400.0, Duration::ZERO);
        assert_eq!(visual_scroll(&engine), 400.0);

        // Anywhere in [800, 2800] shows the pinned section at the top
        engine.jump_to(1800.0, Duration::ZERO);
        assert_eq!(visual_scroll(&engine), 800.0);

        engine.jump_to(3000.0, Duration::ZERO);
        assert_eq!(visual_scroll(&engine), 1000.0);
    }

    #[test]
    fn test_page_lines_fill_area() {
        let engine = engine();
        let lines = page_lines(&engine, &Theme::dark(), 40, 10);
        assert_eq!(lines.len(), 10);
        assert!(lines[0].to_string().starts_with(" #home"));
        assert!(lines.iter().all(|l| l.width() == 40));
    }
}
