use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    /// Poll interval while the page is animating
    animation_rate: Duration,
}

impl EventHandler {
    /// `tick_rate` paces idle polling, `frame` paces polling while animating
    pub fn new(tick_rate: Duration, frame: Duration) -> Self {
        Self {
            tick_rate,
            animation_rate: frame.max(Duration::from_millis(1)),
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll at frame rate so animations advance smoothly
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if !event::poll(timeout)? {
            return Ok(Some(AppEvent::Tick));
        }
        match event::read()? {
            // Only key presses; some terminals also report releases
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => Ok(Some(AppEvent::Wheel(1.0))),
                MouseEventKind::ScrollUp => Ok(Some(AppEvent::Wheel(-1.0))),
                _ => Ok(None),
            },
            Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
            _ => Ok(None),
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse wheel notches, positive is down
    Wheel(f64),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
