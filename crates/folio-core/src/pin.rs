//! Horizontal pin region
//!
//! On wide viewports the projects section is held in place while the page
//! scrolls through a range equal to the track's overflow, and that scrolled
//! distance is mapped onto a horizontal translation of the track. Below the
//! breakpoint the section is ordinary flow content.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::PinConfig;
use crate::error::Degradation;
use crate::layout::{PinTrack, Viewport};
use crate::trigger::{TriggerEnd, TriggerHandle, Window};

/// Positions closer than this to a snap stop are left alone
const SNAP_TOLERANCE_PX: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinRegionState {
    /// Viewport is at or above the breakpoint
    pub enabled: bool,
    /// Track width minus viewport width, never negative
    pub total_travel: f64,
    /// Fraction of the pinned range scrolled through, in [0, 1]
    pub progress: f64,
    /// Ordered snap stops as progress fractions
    pub snap_points: Vec<f64>,
}

impl PinRegionState {
    fn flat() -> Self {
        Self {
            enabled: false,
            total_travel: 0.0,
            progress: 0.0,
            snap_points: Vec::new(),
        }
    }
}

/// How the region was taken out of service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suspension {
    /// Spacer and transform stay where they are
    Graceful,
    /// Spacer removed and transform reset
    Immediate,
}

/// Equally spaced stops for `panel_count` panels; empty below two panels
pub fn snap_fractions(panel_count: usize) -> Vec<f64> {
    if panel_count < 2 {
        return Vec::new();
    }
    let last = (panel_count - 1) as f64;
    (0..panel_count).map(|i| i as f64 / last).collect()
}

/// Linear progress of `position` through the pinned `window`
pub fn progress_at(position: f64, window: Window) -> f64 {
    let range = window.len();
    if range <= 0.0 {
        return if position >= window.start { 1.0 } else { 0.0 };
    }
    ((position - window.start) / range).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct HorizontalPinRegion {
    region: String,
    trigger: TriggerHandle,
    config: PinConfig,
    state: PinRegionState,
    suspension: Option<Suspension>,
    /// Progress as drawn, trailing `state.progress` by the scrub lag
    rendered_progress: f64,
    last_update: Option<Duration>,
}

impl HorizontalPinRegion {
    pub fn new(region: impl Into<String>, trigger: TriggerHandle, config: PinConfig) -> Self {
        Self {
            region: region.into(),
            trigger,
            config,
            state: PinRegionState::flat(),
            suspension: None,
            rendered_progress: 0.0,
            last_update: None,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn trigger(&self) -> TriggerHandle {
        self.trigger
    }

    pub fn state(&self) -> &PinRegionState {
        &self.state
    }

    pub fn suspension(&self) -> Option<Suspension> {
        self.suspension
    }

    pub fn is_suspended(&self) -> bool {
        self.suspension.is_some()
    }

    /// Pinned and reacting to scroll
    pub fn is_pinning(&self) -> bool {
        self.state.enabled && self.suspension.is_none()
    }

    /// Recompute everything from the viewport and track
    ///
    /// Crossing below the breakpoint is a hard reset to flat layout; a
    /// missing track does the same.
    pub fn configure(&mut self, viewport: Viewport, track: Option<PinTrack>) {
        let was_enabled = self.state.enabled;

        let track = match track {
            Some(track) if viewport.width >= self.config.min_width_px => track,
            _ => {
                self.reset();
                if was_enabled {
                    info!(width = viewport.width, "pin region switched to flat layout");
                }
                return;
            }
        };

        let overflow = track.track_width - viewport.width;
        if overflow <= 0.0 {
            debug!(
                "{}",
                Degradation::DegenerateLayout {
                    track: track.track_width,
                    viewport: viewport.width,
                }
            );
        }
        if track.panel_count < 2 {
            warn!("{}", Degradation::TooFewPanels(track.panel_count));
        }

        self.state = PinRegionState {
            enabled: true,
            total_travel: overflow.max(0.0),
            progress: self.state.progress,
            snap_points: snap_fractions(track.panel_count),
        };
        if !was_enabled {
            info!(
                width = viewport.width,
                travel = self.state.total_travel,
                "pin region switched to pinned layout"
            );
        }
    }

    fn reset(&mut self) {
        self.state = PinRegionState::flat();
        self.suspension = None;
        self.rendered_progress = 0.0;
        self.last_update = None;
    }

    /// Extra flow height the pinned section occupies
    pub fn spacing(&self) -> f64 {
        if self.state.enabled && self.suspension != Some(Suspension::Immediate) {
            self.state.total_travel
        } else {
            0.0
        }
    }

    /// End of the pin trigger: the scroll distance consumed by the pin
    pub fn trigger_end(&self) -> TriggerEnd {
        TriggerEnd::Distance(self.state.total_travel)
    }

    /// Take the region out of service for a directed jump
    ///
    /// Returns false when there was nothing to suspend.
    pub fn disable(&mut self, immediate: bool) -> bool {
        if !self.state.enabled || self.suspension.is_some() {
            return false;
        }
        if immediate {
            self.suspension = Some(Suspension::Immediate);
            self.state.progress = 0.0;
            self.rendered_progress = 0.0;
        } else {
            self.suspension = Some(Suspension::Graceful);
        }
        debug!(immediate, "pin region suspended");
        true
    }

    /// Put the region back in service; geometry must be recomputed afterwards
    pub fn enable(&mut self) -> bool {
        let resumed = self.suspension.take().is_some();
        if resumed {
            self.last_update = None;
            debug!("pin region resumed");
        }
        resumed
    }

    /// Follow the scroll position; frozen while suspended or flat
    pub fn update(&mut self, position: f64, window: Option<Window>, now: Duration) {
        if !self.is_pinning() {
            return;
        }
        let Some(window) = window else {
            return;
        };

        self.state.progress = progress_at(position, window);

        let dt = self
            .last_update
            .map(|last| now.saturating_sub(last))
            .unwrap_or_default();
        self.last_update = Some(now);

        if self.config.scrub_ms == 0 {
            self.rendered_progress = self.state.progress;
            return;
        }
        let alpha = 1.0 - (-dt.as_secs_f64() * 1000.0 / self.config.scrub_ms as f64).exp();
        self.rendered_progress += (self.state.progress - self.rendered_progress) * alpha;
        if (self.state.progress - self.rendered_progress).abs() < 1e-4 {
            self.rendered_progress = self.state.progress;
        }
    }

    /// Horizontal offset of the track for a progress value
    pub fn translation_at(&self, progress: f64) -> f64 {
        if !self.state.enabled || self.state.total_travel <= 0.0 {
            return 0.0;
        }
        -progress.clamp(0.0, 1.0) * self.state.total_travel
    }

    /// Exact translation for the current progress
    pub fn translation(&self) -> f64 {
        self.translation_at(self.state.progress)
    }

    /// Translation as drawn, including the scrub lag
    pub fn rendered_translation(&self) -> f64 {
        self.translation_at(self.rendered_progress)
    }

    pub fn nearest_snap(&self, progress: f64) -> Option<f64> {
        self.state
            .snap_points
            .iter()
            .copied()
            .min_by(|a, b| (a - progress).abs().total_cmp(&(b - progress).abs()))
    }

    /// Scroll position and duration of the snap due at `position`, if any
    pub fn snap_request(&self, position: f64, window: Window) -> Option<(f64, Duration)> {
        if !self.is_pinning() || window.is_empty() {
            return None;
        }
        if position < window.start || position > window.end {
            return None;
        }

        let progress = progress_at(position, window);
        let stop = self.nearest_snap(progress)?;
        let target = window.start + stop * window.len();
        if (target - position).abs() < SNAP_TOLERANCE_PX {
            return None;
        }

        let step = 1.0 / (self.state.snap_points.len() - 1) as f64;
        let ratio = ((stop - progress).abs() / step).clamp(0.0, 1.0);
        let min = self.config.snap_min_duration_ms as f64;
        let max = self.config.snap_max_duration_ms.max(self.config.snap_min_duration_ms) as f64;
        let duration = Duration::from_secs_f64((min + (max - min) * ratio) / 1000.0);

        Some((target, duration))
    }
}
