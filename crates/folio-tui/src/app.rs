use std::collections::VecDeque;
use std::time::{Duration, Instant};

use folio_core::config::UiConfig;
use folio_core::layout::{anchor_id, Viewport};
use folio_core::router::NavOutcome;
use folio_core::{EngineEvent, ScrollEngine, ScrollReason};
use tracing::debug;

use crate::input::Action;
use crate::theme::Theme;

/// Most recent engine events kept for the log pane
const EVENT_LOG_CAPACITY: usize = 200;

/// Rows taken by the nav bar and the status bar
pub const CHROME_ROWS: u16 = 2;

/// Page viewport represented by a terminal area of `cols` x `rows` cells
pub fn viewport_from_terminal(cols: u16, rows: u16, ui: &UiConfig) -> Viewport {
    Viewport::new(
        (f64::from(cols) * ui.cell_width_px).max(1.0),
        (f64::from(rows) * ui.cell_height_px).max(1.0),
    )
}

/// One log line per event worth showing; layout recomputes are too chatty
pub fn describe(event: &EngineEvent) -> Option<String> {
    let line = match event {
        EngineEvent::ScrollStarted { id, target, reason } => match reason {
            ScrollReason::Navigation { anchor } => {
                format!("{:?} navigate #{} -> {:.0}px", id, anchor, target)
            }
            ScrollReason::Snap => format!("{:?} snap -> {:.0}px", id, target),
        },
        EngineEvent::ScrollFinished { id, outcome } => format!("{:?} {:?}", id, outcome),
        EngineEvent::Trigger { region, kind, .. } => format!("{} {:?}", region, kind),
        EngineEvent::ActiveLinkChanged { href } => {
            format!("active {}", href.as_deref().unwrap_or("-"))
        }
        EngineEvent::PinSuspended { immediate } => {
            format!("pin suspended{}", if *immediate { " (immediate)" } else { "" })
        }
        EngineEvent::PinResumed => "pin resumed".to_string(),
        EngineEvent::PinModeChanged { enabled } => {
            format!("pin {}", if *enabled { "enabled" } else { "flat" })
        }
        EngineEvent::LayoutRecomputed => return None,
    };
    Some(line)
}

/// Application state
pub struct App {
    pub engine: ScrollEngine,
    pub theme: Theme,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub event_log: VecDeque<String>,
    started: Instant,
}

impl App {
    pub fn new(engine: ScrollEngine, theme: Theme) -> Self {
        Self {
            engine,
            theme,
            should_quit: false,
            status_message: None,
            event_log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            started: Instant::now(),
        }
    }

    /// Time since the preview started, the engine's clock
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn ui(&self) -> &UiConfig {
        &self.engine.config().ui
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Advance the engine one frame and log what happened
    pub fn tick(&mut self) {
        let now = self.now();
        for event in self.engine.tick(now) {
            if let Some(line) = describe(&event) {
                self.push_log(line);
            }
        }
    }

    fn push_log(&mut self, line: String) {
        if self.event_log.len() == EVENT_LOG_CAPACITY {
            self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }

    /// Mouse wheel notches, positive is down
    pub fn wheel(&mut self, notches: f64) {
        let now = self.now();
        let step = self.ui().wheel_step_px;
        self.engine.wheel(notches * step, now);
    }

    /// Terminal resized; the page area excludes the chrome rows
    pub fn resize_terminal(&mut self, cols: u16, rows: u16) {
        let viewport = viewport_from_terminal(cols, rows.saturating_sub(CHROME_ROWS), self.ui());
        debug!(cols, rows, width = viewport.width, height = viewport.height, "terminal resized");
        let now = self.now();
        self.engine.resize(viewport.width, viewport.height, now);
    }

    /// Animation, pending resume or scrub lag still in progress
    pub fn needs_fast_update(&self) -> bool {
        if !self.engine.is_idle() {
            return true;
        }
        self.engine
            .pin()
            .is_some_and(|pin| (pin.rendered_translation() - pin.translation()).abs() > 0.5)
    }

    pub fn handle_action(&mut self, action: Action) {
        let now = self.now();
        let step = self.ui().wheel_step_px;
        let page = self.engine.viewport().height * 0.9;

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.engine.wheel(step, now),
            Action::ScrollUp => self.engine.wheel(-step, now),
            Action::PageDown => self.engine.wheel(page, now),
            Action::PageUp => self.engine.wheel(-page, now),
            Action::JumpToTop => self.engine.jump_to(0.0, now),
            Action::JumpToBottom => {
                let bottom = self.engine.controller().max_scroll();
                self.engine.jump_to(bottom, now);
            }
            Action::Navigate(index) => self.navigate(index),
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.set_status(format!("Theme: {}", self.theme.mode.name()));
            }
            Action::TogglePin => self.toggle_pin(),
            Action::None => {}
        }
    }

    fn navigate(&mut self, index: usize) {
        let Some(link) = self.engine.layout().nav.get(index).cloned() else {
            self.set_status(format!("No link {}", index + 1));
            return;
        };
        if anchor_id(&link.href).is_none() {
            self.set_status(format!("{} leaves the page", link.href));
            return;
        }

        let now = self.now();
        match self.engine.navigate_to(&link.href, now) {
            NavOutcome::MissingTarget { anchor } => {
                self.set_status(format!("No section '{}'", anchor));
            }
            NavOutcome::Direct { .. } => self.set_status(format!("-> {}", link.label)),
            NavOutcome::AcrossPin { .. } => {
                self.set_status(format!("-> {} (pin suspended)", link.label))
            }
        }
    }

    fn toggle_pin(&mut self) {
        let now = self.now();
        let Some(pin) = self.engine.pin() else {
            self.set_status("No pinned section");
            return;
        };
        if pin.is_suspended() {
            if self.engine.resume_pin(now) {
                self.set_status("Pin resumed");
            }
        } else if self.engine.suspend_pin(false, now) {
            self.set_status("Pin suspended");
        } else {
            self.set_status("Pin is flat at this width");
        }
    }
}
