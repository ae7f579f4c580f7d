//! Smooth scroll controller
//!
//! Combines easing functions and timing utilities to own the virtual scroll
//! position of the page.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingCurve, EasingType};
use super::timing::{is_complete, progress};
use crate::config::NavigationConfig;
use crate::error::Degradation;

/// Distance under which a scroll request counts as already arrived
const ARRIVAL_EPSILON: f64 = 0.01;

/// Identifies one programmatic scroll request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScrollId(u64);

/// How a programmatic scroll request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollOutcome {
    Completed,
    /// Overridden by a newer request, by user input, or by an explicit cancel
    Cancelled,
}

/// Parameters of a programmatic scroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollToOptions {
    /// Added to the target position
    pub offset: f64,
    pub duration: Duration,
    pub easing: EasingType,
}

impl Default for ScrollToOptions {
    fn default() -> Self {
        Self::from(&NavigationConfig::default())
    }
}

impl From<&NavigationConfig> for ScrollToOptions {
    fn from(config: &NavigationConfig) -> Self {
        Self {
            offset: config.offset_px,
            duration: Duration::from_millis(config.duration_ms),
            easing: config.easing,
        }
    }
}

/// What started the current animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Driver {
    /// Wheel input
    Inertia,
    Request(ScrollId),
}

/// Active scroll animation state
#[derive(Debug, Clone, Copy)]
struct ActiveAnimation {
    /// Set on the first tick after the animation was requested
    start: Option<Duration>,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
    driver: Driver,
}

/// Result of advancing the controller by one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollFrame {
    pub position: f64,
    /// Signed distance moved during this frame
    pub velocity: f64,
    pub changed: bool,
    /// Requests that ended since the previous frame, in the order they ended
    pub finished: Vec<(ScrollId, ScrollOutcome)>,
}

/// Owner of the virtual scroll position
///
/// Call `wheel()` for user input or `scroll_to()` for programmatic moves,
/// then `tick()` once per animation frame. At most one animation is in
/// flight; starting a new request cancels the previous one.
#[derive(Debug, Clone)]
pub struct SmoothScrollController {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Current virtual scroll position (always up-to-date)
    position: f64,
    max_scroll: f64,
    /// Pending wheel delta for batching multiple events within one frame
    pending_delta: f64,
    /// Timestamp of the most recent wheel or touch input
    last_input: Option<Duration>,
    /// Requests that ended and have not been reported by `tick` yet
    finished: Vec<(ScrollId, ScrollOutcome)>,
    next_id: u64,
}

impl Default for SmoothScrollController {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl SmoothScrollController {
    /// Create a new controller with configuration
    pub fn new(config: ScrollConfig) -> Self {
        if !config.is_smooth() {
            warn!("{}", Degradation::UnavailablePrimitive("smooth scroll"));
        }
        Self {
            animation: None,
            config,
            position: 0.0,
            max_scroll: 0.0,
            pending_delta: 0.0,
            last_input: None,
            finished: Vec::new(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Check if there's pending work (animation, wheel delta or unreported results)
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0.0 || !self.finished.is_empty()
    }

    /// The programmatic request currently in flight
    pub fn active_request(&self) -> Option<ScrollId> {
        match self.animation.map(|a| a.driver) {
            Some(Driver::Request(id)) => Some(id),
            _ => None,
        }
    }

    /// Final position of the current animation
    pub fn target(&self) -> f64 {
        self.animation.map(|a| a.to).unwrap_or(self.position)
    }

    pub fn last_input(&self) -> Option<Duration> {
        self.last_input
    }

    /// Update the scrollable extent after a layout change
    pub fn set_max_scroll(&mut self, max_scroll: f64) {
        self.max_scroll = max_scroll.max(0.0);
        self.position = self.position.clamp(0.0, self.max_scroll);
        if let Some(anim) = self.animation.as_mut() {
            anim.to = anim.to.clamp(0.0, self.max_scroll);
        }
    }

    /// Set scroll position immediately (no animation)
    pub fn set_position(&mut self, position: f64) {
        self.cancel();
        self.position = position.clamp(0.0, self.max_scroll);
    }

    /// Start a programmatic scroll toward `target + options.offset`
    ///
    /// Any animation in flight is replaced; a replaced request is reported
    /// as cancelled. The outcome of the new request arrives through a later
    /// `tick()`. Without smooth scrolling the jump is immediate.
    pub fn scroll_to(&mut self, target: f64, options: ScrollToOptions) -> ScrollId {
        let id = ScrollId(self.next_id);
        self.next_id += 1;

        self.cancel();
        let to = (target + options.offset).clamp(0.0, self.max_scroll);

        if !self.config.is_smooth() || options.duration.is_zero() {
            self.position = to;
            self.finished.push((id, ScrollOutcome::Completed));
            return id;
        }

        if (to - self.position).abs() < ARRIVAL_EPSILON {
            self.position = to;
            self.finished.push((id, ScrollOutcome::Completed));
            return id;
        }

        debug!(?id, from = self.position, to, "scroll_to");
        self.animation = Some(ActiveAnimation {
            start: None,
            from: self.position,
            to,
            duration: options.duration,
            easing: options.easing,
            driver: Driver::Request(id),
        });
        id
    }

    /// Feed a wheel delta (positive = down)
    ///
    /// Deltas arriving within one frame are batched and turned into a single
    /// inertial animation on the next `tick()`. Wheel input takes over from
    /// any programmatic scroll in flight.
    pub fn wheel(&mut self, delta: f64, now: Duration) {
        self.last_input = Some(now);
        self.cancel_request();

        let delta = delta * self.config.wheel_multiplier;
        if !self.config.is_smooth() {
            self.position = (self.position + delta).clamp(0.0, self.max_scroll);
            self.animation = None;
            return;
        }

        self.pending_delta += delta;
    }

    /// Feed a touch drag delta, applied natively without smoothing
    pub fn touch(&mut self, delta: f64, now: Duration) {
        self.last_input = Some(now);
        self.cancel();
        self.position = (self.position + delta * self.config.touch_multiplier)
            .clamp(0.0, self.max_scroll);
    }

    /// Advance the animation to `now` and report this frame's result
    pub fn tick(&mut self, now: Duration) -> ScrollFrame {
        let previous = self.position;

        // Process any pending wheel delta
        if self.pending_delta != 0.0 {
            let to = (self.target() + self.pending_delta).clamp(0.0, self.max_scroll);
            self.pending_delta = 0.0;

            if (to - self.position).abs() >= ARRIVAL_EPSILON {
                self.animation = Some(ActiveAnimation {
                    start: Some(now),
                    from: self.position,
                    to,
                    duration: self.config.inertia_duration(),
                    easing: self.config.easing,
                    driver: Driver::Inertia,
                });
            }
        }

        if let Some(mut anim) = self.animation {
            let start = *anim.start.get_or_insert(now);
            if is_complete(start, now, anim.duration) {
                self.position = anim.to.clamp(0.0, self.max_scroll);
                self.animation = None;
                if let Driver::Request(id) = anim.driver {
                    self.finished.push((id, ScrollOutcome::Completed));
                }
            } else {
                let t = progress(start, now, anim.duration);
                self.position = anim
                    .easing
                    .interpolate(anim.from, anim.to, t)
                    .clamp(0.0, self.max_scroll);
                self.animation = Some(anim);
            }
        }

        ScrollFrame {
            position: self.position,
            velocity: self.position - previous,
            changed: self.position != previous,
            finished: std::mem::take(&mut self.finished),
        }
    }

    /// Point the request in flight at a new target after a layout change
    ///
    /// The animation restarts from the current position with its original
    /// duration; `id` stays the same so the caller still gets one outcome.
    pub fn retarget(&mut self, id: ScrollId, target: f64) -> bool {
        let max_scroll = self.max_scroll;
        let position = self.position;
        match self.animation.as_mut() {
            Some(anim) if anim.driver == Driver::Request(id) => {
                let to = target.clamp(0.0, max_scroll);
                if (to - anim.to).abs() >= ARRIVAL_EPSILON {
                    debug!(?id, from = anim.to, to, "scroll retargeted");
                    anim.from = position;
                    anim.to = to;
                    anim.start = None;
                }
                true
            }
            _ => false,
        }
    }

    /// Cancel `id` if it is the request in flight
    pub fn cancel_request_id(&mut self, id: ScrollId) -> bool {
        if self.active_request() == Some(id) {
            self.cancel();
            true
        } else {
            false
        }
    }

    /// Cancel any active animation and stop at current position
    pub fn cancel(&mut self) {
        self.cancel_request();
        self.animation = None;
        self.pending_delta = 0.0;
    }

    /// Cancel a programmatic request in flight, leaving inertia alone
    fn cancel_request(&mut self) {
        if let Some(id) = self.active_request() {
            self.finished.push((id, ScrollOutcome::Cancelled));
            self.animation = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn controller(smooth: bool) -> SmoothScrollController {
        let mut controller = SmoothScrollController::new(ScrollConfig {
            smooth_enabled: smooth,
            animation_duration_ms: 100,
            ..Default::default()
        });
        controller.set_max_scroll(5000.0);
        controller
    }

    fn options(duration_ms: u64) -> ScrollToOptions {
        ScrollToOptions {
            offset: 0.0,
            duration: ms(duration_ms),
            easing: EasingType::Linear,
        }
    }

    #[test]
    fn test_scroll_to_animates_and_completes() {
        let mut controller = controller(true);
        let id = controller.scroll_to(1000.0, options(100));
        assert!(controller.is_animating());

        let frame = controller.tick(ms(0));
        assert_eq!(frame.position, 0.0);

        let frame = controller.tick(ms(50));
        assert!((frame.position - 500.0).abs() < 1e-6);
        assert!(frame.changed);
        assert!(frame.finished.is_empty());

        let frame = controller.tick(ms(100));
        assert_eq!(frame.position, 1000.0);
        assert_eq!(frame.finished, vec![(id, ScrollOutcome::Completed)]);
        assert!(!controller.is_animating());
    }

    #[test]
    fn test_new_request_cancels_previous() {
        let mut controller = controller(true);
        let first = controller.scroll_to(1000.0, options(100));
        controller.tick(ms(0));
        controller.tick(ms(50));

        let second = controller.scroll_to(200.0, options(100));
        let frame = controller.tick(ms(60));
        assert_eq!(frame.finished, vec![(first, ScrollOutcome::Cancelled)]);

        let frame = controller.tick(ms(200));
        assert_eq!(frame.position, 200.0);
        assert_eq!(frame.finished, vec![(second, ScrollOutcome::Completed)]);
    }

    #[test]
    fn test_instant_scroll_when_smooth_unavailable() {
        let mut controller = controller(false);
        let id = controller.scroll_to(1000.0, options(100));
        assert_eq!(controller.position(), 1000.0);
        assert!(!controller.is_animating());

        let frame = controller.tick(ms(0));
        assert_eq!(frame.finished, vec![(id, ScrollOutcome::Completed)]);

        controller.wheel(100.0, ms(1));
        assert_eq!(controller.position(), 1100.0);
    }

    #[test]
    fn test_offset_and_clamp() {
        let mut controller = controller(false);
        controller.scroll_to(
            1000.0,
            ScrollToOptions {
                offset: -80.0,
                ..options(0)
            },
        );
        assert_eq!(controller.position(), 920.0);

        controller.scroll_to(9000.0, options(0));
        assert_eq!(controller.position(), 5000.0);
    }

    #[test]
    fn test_wheel_batching() {
        let mut controller = controller(true);
        controller.wheel(10.0, ms(0));
        controller.wheel(10.0, ms(1));
        controller.wheel(10.0, ms(2));

        controller.tick(ms(5));
        assert_eq!(controller.target(), 30.0);

        controller.tick(ms(200));
        assert_eq!(controller.position(), 30.0);
        assert!(!controller.needs_update());
    }

    #[test]
    fn test_wheel_cancels_programmatic_scroll() {
        let mut controller = controller(true);
        let id = controller.scroll_to(1000.0, options(100));
        controller.tick(ms(0));
        controller.tick(ms(50));

        controller.wheel(20.0, ms(55));
        let frame = controller.tick(ms(60));
        assert_eq!(frame.finished, vec![(id, ScrollOutcome::Cancelled)]);
        assert!((controller.target() - 520.0).abs() < 1e-6);
        assert_eq!(controller.last_input(), Some(ms(55)));
    }

    #[test]
    fn test_touch_is_native() {
        let mut controller = controller(true);
        controller.touch(50.0, ms(0));
        assert_eq!(controller.position(), 100.0);
        assert!(!controller.is_animating());
    }

    #[test]
    fn test_request_at_current_position_completes_immediately() {
        let mut controller = controller(true);
        let id = controller.scroll_to(0.0, options(100));
        assert!(!controller.is_animating());
        assert_eq!(controller.tick(ms(0)).finished, vec![(id, ScrollOutcome::Completed)]);
    }

    #[test]
    fn test_shrinking_extent_clamps_position() {
        let mut controller = controller(false);
        controller.set_position(4000.0);
        controller.set_max_scroll(1500.0);
        assert_eq!(controller.position(), 1500.0);
    }

    #[test]
    fn test_retarget_keeps_request_id() {
        let mut controller = controller(true);
        let id = controller.scroll_to(1000.0, options(100));
        controller.tick(ms(0));
        controller.tick(ms(50));

        assert!(controller.retarget(id, 600.0));
        assert_eq!(controller.target(), 600.0);
        controller.tick(ms(60));
        let frame = controller.tick(ms(200));
        assert_eq!(frame.position, 600.0);
        assert_eq!(frame.finished, vec![(id, ScrollOutcome::Completed)]);

        assert!(!controller.retarget(id, 100.0));
    }

    #[test]
    fn test_cancel_request_id_only_matches_active() {
        let mut controller = controller(true);
        let first = controller.scroll_to(1000.0, options(100));
        let second = controller.scroll_to(2000.0, options(100));
        assert!(!controller.cancel_request_id(first));
        assert!(controller.cancel_request_id(second));
        let frame = controller.tick(ms(0));
        assert_eq!(
            frame.finished,
            vec![
                (first, ScrollOutcome::Cancelled),
                (second, ScrollOutcome::Cancelled)
            ]
        );
    }
}
