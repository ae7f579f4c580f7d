use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use folio_core::scroll::ScrollConfigExt;
use folio_core::{AppConfig, ScrollEngine};
use folio_tui::{
    app::{viewport_from_terminal, App, CHROME_ROWS},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{EventLogWidget, InspectorWidget, NavBarWidget, PageWidget, StatusBarWidget},
    Theme,
};

pub async fn run(config: AppConfig, layout: Option<PathBuf>) -> Result<()> {
    let mut layout = super::load_layout(&config, layout)?;

    // The page viewport follows the terminal size
    let (cols, rows) = terminal::size()?;
    layout.viewport = viewport_from_terminal(page_cols(cols), rows.saturating_sub(CHROME_ROWS), &config.ui);

    let theme = Theme::from_name(&config.ui.theme);
    let event_handler = EventHandler::new(
        Duration::from_millis(config.ui.tick_rate_ms),
        config.scroll.frame_interval(),
    );
    let engine = ScrollEngine::new(layout, config)?;
    let mut app = App::new(engine, theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("folio"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Columns the page pane gets out of the full terminal width
fn page_cols(cols: u16) -> u16 {
    // Matches the 62% split below, minus the pane borders
    (u32::from(cols) * 62 / 100).saturating_sub(2) as u16
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    // Checked at the end of each iteration to pick the next poll interval
    let mut needs_fast_update = true;

    loop {
        app.tick();

        terminal.draw(|frame| {
            let size = frame.area();

            // Nav bar, content, status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .split(size);

            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(main_layout[1]);

            let side = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(8), Constraint::Min(3)])
                .split(columns[1]);

            NavBarWidget::render(frame, main_layout[0], app);
            PageWidget::render(frame, columns[0], app);
            InspectorWidget::render(frame, side[0], app);
            EventLogWidget::render(frame, side[1], app);
            StatusBarWidget::render(frame, main_layout[2], app);
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    app.clear_status();
                    let action = handle_key_event(key);
                    app.handle_action(action);
                }
                AppEvent::Wheel(notches) => app.wheel(notches),
                AppEvent::Resize(cols, rows) => app.resize_terminal(page_cols(cols), rows),
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            return Ok(());
        }
    }
}
