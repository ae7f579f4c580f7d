//! Scroll choreography engine
//!
//! Owns the scroll controller, the trigger registry, the pin region, the
//! router and the scroll spy, and drives them from one frame tick. Within a
//! tick the position is advanced first, triggers are evaluated against it
//! next, and the pin region and spy react last, so no reaction ever reads
//! the previous frame's position.
//!
//! Everything that happened is reported as [`EngineEvent`]s drained by
//! [`ScrollEngine::tick`].

use std::mem;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::Degradation;
use crate::layout::{Geometry, PageLayout, Viewport};
use crate::pin::{HorizontalPinRegion, PinRegionState};
use crate::router::{NavContext, NavOutcome, NavigationRouter};
use crate::scroll::{ScrollId, ScrollOutcome, ScrollToOptions, SmoothScrollController};
use crate::spy::ScrollSpy;
use crate::trigger::{
    Edge, ScrollTriggerRegistry, TriggerEnd, TriggerEventKind, TriggerHandle, TriggerSpec, Window,
};

/// Snap targets this close to the current position are skipped
const SNAP_EPSILON_PX: f64 = 0.5;

/// Why a programmatic scroll was started
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrollReason {
    Navigation { anchor: String },
    Snap,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    ScrollStarted {
        id: ScrollId,
        target: f64,
        reason: ScrollReason,
    },
    ScrollFinished {
        id: ScrollId,
        outcome: ScrollOutcome,
    },
    Trigger {
        handle: TriggerHandle,
        region: String,
        kind: TriggerEventKind,
    },
    ActiveLinkChanged {
        href: Option<String>,
    },
    PinSuspended {
        immediate: bool,
    },
    PinResumed,
    /// The viewport crossed the pin breakpoint
    PinModeChanged {
        enabled: bool,
    },
    LayoutRecomputed,
}

pub struct ScrollEngine {
    config: AppConfig,
    layout: PageLayout,
    geometry: Geometry,
    controller: SmoothScrollController,
    registry: ScrollTriggerRegistry,
    pin: Option<HorizontalPinRegion>,
    router: NavigationRouter,
    spy: ScrollSpy,
    /// Snap request in flight
    snap: Option<ScrollId>,
    /// Geometry no longer matches the layout
    layout_dirty: bool,
    events: Vec<EngineEvent>,
}

impl ScrollEngine {
    /// Build the engine for `layout` and evaluate the initial position.
    ///
    /// Callbacks fired by the initial evaluation are returned by the first
    /// `tick`.
    pub fn new(layout: PageLayout, config: AppConfig) -> crate::Result<Self> {
        layout.validate()?;

        let mut registry = ScrollTriggerRegistry::new();
        let pin = layout.pin_section().map(|(section, _)| {
            let trigger = registry.create_trigger(TriggerSpec::new(
                section.id.clone(),
                Edge::TOP_TOP,
                TriggerEnd::Distance(0.0),
            ));
            HorizontalPinRegion::new(section.id.clone(), trigger, config.pin.clone())
        });
        let spy = ScrollSpy::bind(&layout.nav, &layout, &mut registry, &config.spy);

        let mut engine = Self {
            controller: SmoothScrollController::new(config.scroll.clone()),
            router: NavigationRouter::new(config.navigation.clone()),
            geometry: Geometry::default(),
            config,
            layout,
            registry,
            pin,
            spy,
            snap: None,
            layout_dirty: false,
            events: Vec::new(),
        };

        engine.configure_pin();
        engine.relayout();
        engine.evaluate(Duration::ZERO);

        info!(
            sections = engine.layout.sections.len(),
            triggers = engine.registry.len(),
            pinned = engine.pin.as_ref().is_some_and(|p| p.is_pinning()),
            "scroll engine ready"
        );
        Ok(engine)
    }

    /// Full pin recompute from the current viewport and track
    fn configure_pin(&mut self) {
        let track = self.layout.pin_section().map(|(_, track)| track);
        if let Some(pin) = self.pin.as_mut() {
            pin.configure(self.layout.viewport, track);
        }
    }

    /// Re-measure the page and every trigger window
    fn relayout(&mut self) {
        let spacing = self.pin.as_ref().map_or(0.0, |p| p.spacing());
        self.geometry = self.layout.measure(spacing);

        if let Some(pin) = self.pin.as_ref() {
            self.registry.set_end(pin.trigger(), pin.trigger_end());
            self.registry.set_enabled(pin.trigger(), pin.is_pinning());
        }

        self.controller
            .set_max_scroll(self.geometry.max_scroll(self.layout.viewport));
        self.registry
            .recompute_all(&self.geometry, self.layout.viewport);
        self.router.retarget(&self.geometry, &mut self.controller);
        self.layout_dirty = false;

        debug!(
            document_height = self.geometry.document_height(),
            max_scroll = self.controller.max_scroll(),
            "layout recomputed"
        );
        self.events.push(EngineEvent::LayoutRecomputed);
    }

    /// Evaluate triggers at the current position and let dependents react
    fn evaluate(&mut self, now: Duration) {
        let position = self.controller.position();
        let fired = self.registry.update(position);

        if let Some(pin) = self.pin.as_mut() {
            let window = self.registry.window(pin.trigger());
            pin.update(position, window, now);
        }

        for event in fired {
            let region = self
                .registry
                .region(event.handle)
                .unwrap_or_default()
                .to_string();
            self.events.push(EngineEvent::Trigger {
                handle: event.handle,
                region,
                kind: event.kind,
            });

            if self.spy.handle(event) {
                self.events.push(EngineEvent::ActiveLinkChanged {
                    href: self.spy.active_href().map(str::to_string),
                });
            }
        }
    }

    /// Advance one frame and drain everything that happened since the last
    pub fn tick(&mut self, now: Duration) -> Vec<EngineEvent> {
        if self
            .router
            .poll(now, self.pin.as_mut(), &mut self.registry)
        {
            self.events.push(EngineEvent::PinResumed);
            self.layout_dirty = true;
        }

        if self.layout_dirty {
            debug!("{}", Degradation::StaleGeometry);
            self.relayout();
        }

        let frame = self.controller.tick(now);
        self.evaluate(now);

        for (id, outcome) in frame.finished {
            self.events.push(EngineEvent::ScrollFinished { id, outcome });
            if self.snap == Some(id) {
                self.snap = None;
            }
            self.router.on_scroll_finished(id, outcome, now);
        }

        self.maybe_snap(now);

        mem::take(&mut self.events)
    }

    /// Start a snap once input has been quiet for the snap delay
    fn maybe_snap(&mut self, now: Duration) {
        if !self.config.pin.snap_enabled
            || self.snap.is_some()
            || self.router.is_navigating()
            || self.controller.needs_update()
        {
            return;
        }

        let quiet = Duration::from_millis(self.config.pin.snap_delay_ms);
        if self
            .controller
            .last_input()
            .is_some_and(|last| now.saturating_sub(last) < quiet)
        {
            return;
        }

        let Some(pin) = self.pin.as_ref().filter(|p| p.is_pinning()) else {
            return;
        };
        let Some(window) = self.registry.window(pin.trigger()) else {
            return;
        };
        let position = self.controller.position();
        let Some((target, duration)) = pin.snap_request(position, window) else {
            return;
        };

        let target = target.clamp(0.0, self.controller.max_scroll());
        if (target - position).abs() < SNAP_EPSILON_PX {
            return;
        }

        let id = self.controller.scroll_to(
            target,
            ScrollToOptions {
                offset: 0.0,
                duration,
                easing: self.config.pin.snap_easing,
            },
        );
        debug!(?id, from = position, to = target, "snapping");
        self.snap = Some(id);
        self.events.push(EngineEvent::ScrollStarted {
            id,
            target,
            reason: ScrollReason::Snap,
        });
    }

    /// Wheel input, positive scrolls down
    pub fn wheel(&mut self, delta: f64, now: Duration) {
        self.controller.wheel(delta, now);
    }

    /// Touch drag, applied without smoothing
    pub fn touch(&mut self, delta: f64, now: Duration) {
        self.controller.touch(delta, now);
        self.evaluate(now);
    }

    /// Move to `position` without animation
    pub fn jump_to(&mut self, position: f64, now: Duration) {
        self.controller.set_position(position);
        self.evaluate(now);
    }

    /// Navigate to an in-page anchor
    pub fn navigate_to(&mut self, anchor: &str, now: Duration) -> NavOutcome {
        if self.layout_dirty {
            self.relayout();
            self.evaluate(now);
        }

        let outcome = self.router.navigate_to(
            anchor,
            NavContext {
                geometry: &self.geometry,
                controller: &mut self.controller,
                registry: &mut self.registry,
                pin: self.pin.as_mut(),
            },
        );

        let (id, target) = match outcome {
            NavOutcome::MissingTarget { .. } => return outcome,
            NavOutcome::AcrossPin { target, scroll } => {
                self.events
                    .push(EngineEvent::PinSuspended { immediate: false });
                (scroll, target)
            }
            NavOutcome::Direct { target, scroll } => (scroll, target),
        };

        self.snap = None;
        self.events.push(EngineEvent::ScrollStarted {
            id,
            target,
            reason: ScrollReason::Navigation {
                anchor: anchor.trim_start_matches('#').to_string(),
            },
        });
        outcome
    }

    /// Apply a new viewport size
    ///
    /// An in-flight snap is cancelled and geometry is recomputed before
    /// returning, so queries made right after see the new layout.
    pub fn resize(&mut self, width: f64, height: f64, now: Duration) {
        let viewport = Viewport::new(width.max(1.0), height.max(1.0));
        if viewport == self.layout.viewport {
            return;
        }

        if let Some(id) = self.snap.take() {
            self.controller.cancel_request_id(id);
        }

        let was_enabled = self.pin_enabled();
        self.layout.viewport = viewport;
        self.configure_pin();
        self.relayout();
        self.evaluate(now);

        let enabled = self.pin_enabled();
        if enabled != was_enabled {
            self.events.push(EngineEvent::PinModeChanged { enabled });
        }
        debug!(width = viewport.width, height = viewport.height, "viewport resized");
    }

    /// Take the pin region out of service until `resume_pin`
    pub fn suspend_pin(&mut self, immediate: bool, now: Duration) -> bool {
        let Some(pin) = self.pin.as_mut() else {
            return false;
        };
        if !pin.disable(immediate) {
            return false;
        }
        self.registry.set_enabled(pin.trigger(), false);
        self.events.push(EngineEvent::PinSuspended { immediate });
        if immediate {
            self.relayout();
            self.evaluate(now);
        }
        true
    }

    /// Put the pin region back in service and recompute
    pub fn resume_pin(&mut self, now: Duration) -> bool {
        let Some(pin) = self.pin.as_mut() else {
            return false;
        };
        if !pin.enable() {
            return false;
        }
        self.events.push(EngineEvent::PinResumed);
        self.relayout();
        self.evaluate(now);
        true
    }

    /// Re-measure every trigger and re-evaluate them at the current position
    pub fn recompute(&mut self, now: Duration) {
        self.relayout();
        self.evaluate(now);
    }

    /// Drop a section from the page; geometry is recomputed on the next tick
    pub fn remove_section(&mut self, id: &str) -> bool {
        if !self.layout.remove_section(id) {
            return false;
        }
        self.configure_pin();
        self.layout_dirty = true;
        true
    }

    /// Change a section's height; geometry is recomputed on the next tick
    pub fn resize_section(&mut self, id: &str, height: f64) -> bool {
        if !self.layout.resize_section(id, height) {
            return false;
        }
        self.configure_pin();
        self.layout_dirty = true;
        true
    }

    /// Register an extra trigger whose callbacks show up as
    /// [`EngineEvent::Trigger`]
    pub fn observe(&mut self, region: &str, start: Edge, end: TriggerEnd) -> TriggerHandle {
        let handle = self
            .registry
            .create_trigger(TriggerSpec::new(region, start, end));
        self.layout_dirty = true;
        handle
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn position(&self) -> f64 {
        self.controller.position()
    }

    pub fn viewport(&self) -> Viewport {
        self.layout.viewport
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn controller(&self) -> &SmoothScrollController {
        &self.controller
    }

    pub fn pin(&self) -> Option<&HorizontalPinRegion> {
        self.pin.as_ref()
    }

    pub fn pin_state(&self) -> Option<&PinRegionState> {
        self.pin.as_ref().map(|p| p.state())
    }

    fn pin_enabled(&self) -> bool {
        self.pin.as_ref().is_some_and(|p| p.state().enabled)
    }

    pub fn active_link(&self) -> Option<&str> {
        self.spy.active_href()
    }

    pub fn registry(&self) -> &ScrollTriggerRegistry {
        &self.registry
    }

    pub fn trigger_windows(&self) -> Vec<(TriggerHandle, Option<Window>)> {
        self.registry.windows()
    }

    pub fn is_navigating(&self) -> bool {
        self.router.is_navigating()
    }

    /// Nothing left to animate, resume or report
    pub fn is_idle(&self) -> bool {
        !self.controller.needs_update()
            && !self.router.is_navigating()
            && self.snap.is_none()
            && !self.layout_dirty
            && self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{NavLink, Section};
    use crate::trigger::TriggerState;

    const FRAME_MS: u64 = 16;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn page(width: f64, track_width: f64) -> PageLayout {
        PageLayout {
            viewport: Viewport::new(width, 800.0),
            sections: vec![
                Section::new("home", 800.0),
                Section::pinned("projects", 800.0, track_width, 3),
                Section::new("contact", 800.0),
                Section::new("footer", 400.0),
            ],
            nav: vec![
                NavLink::new("Home", "#home"),
                NavLink::new("Projects", "#projects"),
                NavLink::new("Contact", "#contact"),
            ],
        }
    }

    fn engine(width: f64, track_width: f64) -> ScrollEngine {
        let mut config = AppConfig::default();
        config.pin.scrub_ms = 0;
        ScrollEngine::new(page(width, track_width), config).unwrap()
    }

    /// Tick every frame from `from` until the engine goes idle
    fn run(engine: &mut ScrollEngine, from: u64) -> (Vec<(Duration, EngineEvent)>, u64) {
        let mut log = Vec::new();
        let mut now = from;
        loop {
            for event in engine.tick(ms(now)) {
                log.push((ms(now), event));
            }
            if engine.is_idle() || now > from + 20_000 {
                return (log, now);
            }
            now += FRAME_MS;
        }
    }

    fn indices(
        log: &[(Duration, EngineEvent)],
        wanted: impl Fn(&EngineEvent) -> bool,
    ) -> Vec<usize> {
        log.iter()
            .enumerate()
            .filter(|(_, (_, e))| wanted(e))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_initial_tick_reports_first_section() {
        let mut engine = engine(1000.0, 3000.0);
        let events = engine.tick(ms(0));
        assert!(events.contains(&EngineEvent::ActiveLinkChanged {
            href: Some("#home".into())
        }));
        assert_eq!(engine.active_link(), Some("#home"));
    }

    #[test]
    fn test_navigate_past_active_pin_suspends_then_resumes() {
        let mut engine = engine(1000.0, 3000.0);
        assert_eq!(engine.pin_state().unwrap().total_travel, 2000.0);
        run(&mut engine, 0);

        // Pin window is [800, 2800); halfway through
        engine.jump_to(1800.0, ms(100));
        assert_eq!(engine.pin_state().unwrap().progress, 0.5);
        assert_eq!(engine.pin().unwrap().translation(), -1000.0);

        let contact = engine.geometry().rect("contact").unwrap().top;
        let outcome = engine.navigate_to("#contact", ms(100));
        assert!(matches!(outcome, NavOutcome::AcrossPin { target, .. } if target == contact));

        // navigate_to queues its events for the next tick to drain
        let (all, _) = run(&mut engine, 116);
        let suspended = indices(&all, |e| matches!(e, EngineEvent::PinSuspended { .. }));
        let started = indices(&all, |e| {
            matches!(e, EngineEvent::ScrollStarted { reason: ScrollReason::Navigation { anchor }, .. } if anchor == "contact")
        });
        let finished = indices(&all, |e| {
            matches!(e, EngineEvent::ScrollFinished { outcome: ScrollOutcome::Completed, .. })
        });
        let resumed = indices(&all, |e| matches!(e, EngineEvent::PinResumed));

        assert_eq!(suspended.len(), 1);
        assert_eq!(started.len(), 1);
        assert_eq!(finished.len(), 1);
        assert_eq!(resumed.len(), 1);
        assert!(suspended[0] < started[0]);
        assert!(started[0] < finished[0]);
        assert!(finished[0] < resumed[0]);

        let settle = ms(engine.config().navigation.settle_delay_ms);
        assert!(all[resumed[0]].0 >= all[finished[0]].0 + settle);

        assert_eq!(engine.position(), contact);
        assert!(engine.pin().unwrap().is_pinning());
        assert_eq!(engine.pin_state().unwrap().progress, 1.0);
        assert_eq!(engine.active_link(), Some("#contact"));
    }

    #[test]
    fn test_resize_below_breakpoint_resets_pin() {
        let mut engine = engine(1200.0, 3600.0);
        run(&mut engine, 0);

        // Travel 2400 over the window starting at 800
        engine.jump_to(800.0 + 2400.0 * 0.7, ms(100));
        assert!((engine.pin_state().unwrap().progress - 0.7).abs() < 1e-9);

        engine.resize(800.0, 800.0, ms(116));
        let state = engine.pin_state().unwrap();
        assert!(!state.enabled);
        assert_eq!(state.total_travel, 0.0);
        assert_eq!(engine.pin().unwrap().translation(), 0.0);
        assert_eq!(engine.pin().unwrap().rendered_translation(), 0.0);

        let events = engine.tick(ms(132));
        assert!(events.contains(&EngineEvent::PinModeChanged { enabled: false }));
        assert_eq!(engine.geometry().document_height(), 2800.0);
        assert!(engine.position() <= 2000.0);
    }

    #[test]
    fn test_second_navigation_cancels_first() {
        let mut engine = engine(1000.0, 3000.0);
        run(&mut engine, 0);

        let first = engine.navigate_to("#contact", ms(100)).scroll().unwrap();
        for frame in 0..10 {
            engine.tick(ms(100 + frame * FRAME_MS));
        }
        let second = engine.navigate_to("#home", ms(260)).scroll().unwrap();
        let (log, _) = run(&mut engine, 260);

        let outcomes: Vec<_> = log
            .iter()
            .filter_map(|(_, e)| match e {
                EngineEvent::ScrollFinished { id, outcome } => Some((*id, *outcome)),
                _ => None,
            })
            .collect();
        assert_eq!(
            outcomes,
            vec![
                (first, ScrollOutcome::Cancelled),
                (second, ScrollOutcome::Completed)
            ]
        );
        assert_eq!(engine.position(), 0.0);
        assert!(engine.pin().unwrap().is_pinning());
        assert_eq!(engine.active_link(), Some("#home"));
    }

    #[test]
    fn test_missing_anchor_is_ignored() {
        let mut engine = engine(1000.0, 3000.0);
        run(&mut engine, 0);

        let outcome = engine.navigate_to("#nowhere", ms(0));
        assert!(matches!(outcome, NavOutcome::MissingTarget { .. }));
        assert!(engine.tick(ms(16)).is_empty());
        assert!(engine.is_idle());
    }

    #[test]
    fn test_snap_after_input_settles() {
        let mut engine = engine(1000.0, 3000.0);
        run(&mut engine, 0);

        // Progress 0.3, nearest stop is 0.5
        engine.jump_to(800.0 + 600.0, ms(100));
        engine.wheel(10.0, ms(100));

        let (log, _) = run(&mut engine, 100);
        let snaps: Vec<_> = log
            .iter()
            .filter(|(_, e)| {
                matches!(e, EngineEvent::ScrollStarted { reason: ScrollReason::Snap, .. })
            })
            .collect();
        assert_eq!(snaps.len(), 1);
        assert!(snaps[0].0 >= ms(100 + engine.config().pin.snap_delay_ms));
        assert!(matches!(snaps[0].1, EngineEvent::ScrollStarted { target, .. } if target == 1800.0));

        assert_eq!(engine.position(), 1800.0);
        assert_eq!(engine.pin_state().unwrap().progress, 0.5);
    }

    #[test]
    fn test_resize_cancels_snap() {
        let mut engine = engine(1000.0, 3000.0);
        run(&mut engine, 0);
        engine.jump_to(800.0 + 600.0, ms(100));
        engine.wheel(10.0, ms(100));

        let mut now = 100;
        let snap = loop {
            let started = engine.tick(ms(now)).into_iter().find_map(|e| match e {
                EngineEvent::ScrollStarted {
                    id,
                    reason: ScrollReason::Snap,
                    ..
                } => Some(id),
                _ => None,
            });
            if let Some(id) = started {
                break id;
            }
            assert!(now < 5000, "no snap started");
            now += FRAME_MS;
        };
        assert_eq!(engine.snap, Some(snap));

        now += FRAME_MS;
        engine.resize(1200.0, 800.0, ms(now));
        assert_eq!(engine.snap, None);
        assert!(!engine.controller().is_animating());
        // Travel is now 3000 - 1200
        let pin_window = engine.registry().window(engine.pin().unwrap().trigger());
        assert_eq!(pin_window, Some(Window { start: 800.0, end: 2600.0 }));

        let events = engine.tick(ms(now + FRAME_MS));
        assert!(events.contains(&EngineEvent::ScrollFinished {
            id: snap,
            outcome: ScrollOutcome::Cancelled,
        }));
        assert!(events.contains(&EngineEvent::LayoutRecomputed));
    }

    #[test]
    fn test_relayout_reevaluates_triggers_at_once() {
        let mut engine = engine(1000.0, 3000.0);
        let handle = engine.observe(
            "contact",
            Edge::new(0.0, 0.6),
            TriggerEnd::Edge(Edge::new(1.0, 0.6)),
        );
        run(&mut engine, 0);

        // Contact's window is [3120, 3920) while pinned
        engine.jump_to(1500.0, ms(100));
        assert_eq!(engine.registry().state(handle), TriggerState::Idle);
        assert_eq!(engine.active_link(), Some("#projects"));

        // Without the spacer it is [1120, 1920)
        assert!(engine.suspend_pin(true, ms(116)));
        assert_eq!(
            engine.registry().window(handle),
            Some(Window { start: 1120.0, end: 1920.0 })
        );
        assert_eq!(engine.registry().state(handle), TriggerState::Active);
        assert_eq!(engine.active_link(), Some("#contact"));

        assert!(engine.resume_pin(ms(132)));
        assert_eq!(engine.registry().state(handle), TriggerState::Idle);
        assert_eq!(engine.active_link(), Some("#projects"));

        engine.jump_to(3500.0, ms(148));
        assert_eq!(engine.registry().state(handle), TriggerState::Active);

        // A taller first section pushes contact's window to [3520, 4320)
        assert!(engine.layout.resize_section("home", 1200.0));
        engine.recompute(ms(164));
        assert_eq!(engine.registry().state(handle), TriggerState::Idle);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut engine = engine(1440.0, 4320.0);
        engine.jump_to(2500.0, ms(0));

        engine.recompute(ms(0));
        let first = engine.trigger_windows();
        engine.recompute(ms(0));
        assert_eq!(engine.trigger_windows(), first);
        assert_eq!(engine.pin_state().unwrap().total_travel, 2880.0);
    }

    #[test]
    fn test_removed_section_deactivates_observer() {
        let mut engine = engine(1000.0, 3000.0);
        let handle = engine.observe(
            "contact",
            Edge::new(0.0, 0.6),
            TriggerEnd::Edge(Edge::new(1.0, 0.6)),
        );
        run(&mut engine, 0);

        // Contact is [3600, 4400); its window starts at 3120
        engine.jump_to(3500.0, ms(100));
        assert_eq!(engine.registry().state(handle), TriggerState::Active);

        assert!(engine.remove_section("contact"));
        let events = engine.tick(ms(116));
        assert!(events.contains(&EngineEvent::Trigger {
            handle,
            region: "contact".into(),
            kind: TriggerEventKind::Leave,
        }));
        assert_eq!(engine.registry().window(handle), None);
        assert_eq!(engine.registry().state(handle), TriggerState::Idle);

        engine.recompute(ms(0));
        assert_eq!(engine.registry().window(handle), None);
    }

    #[test]
    fn test_native_fallback_still_resumes_pin() {
        let mut config = AppConfig::default();
        config.scroll.smooth_enabled = false;
        let mut engine = ScrollEngine::new(page(1000.0, 3000.0), config).unwrap();
        engine.jump_to(1800.0, ms(0));

        engine.navigate_to("contact", ms(0));
        assert_eq!(engine.position(), 3600.0);
        assert!(engine.pin().unwrap().is_suspended());

        let (log, _) = run(&mut engine, 16);
        assert!(log
            .iter()
            .any(|(_, e)| matches!(e, EngineEvent::PinResumed)));
        assert!(!engine.pin().unwrap().is_suspended());
    }

    #[test]
    fn test_immediate_suspension_removes_spacer() {
        let mut engine = engine(1000.0, 3000.0);
        assert_eq!(engine.geometry().rect("contact").unwrap().top, 3600.0);

        assert!(engine.suspend_pin(true, ms(0)));
        assert_eq!(engine.geometry().rect("contact").unwrap().top, 1600.0);
        assert!(!engine.suspend_pin(false, ms(0)));

        assert!(engine.resume_pin(ms(0)));
        assert_eq!(engine.geometry().rect("contact").unwrap().top, 3600.0);
    }

    #[test]
    fn test_layout_without_pin_section() {
        let layout = PageLayout {
            viewport: Viewport::new(1440.0, 900.0),
            sections: vec![Section::new("home", 900.0), Section::new("contact", 900.0)],
            nav: vec![NavLink::new("Contact", "#contact")],
        };
        let mut engine = ScrollEngine::new(layout, AppConfig::default()).unwrap();
        assert!(engine.pin().is_none());
        assert!(matches!(
            engine.navigate_to("#contact", ms(0)),
            NavOutcome::Direct { target, .. } if target == 900.0
        ));
        assert!(!engine.suspend_pin(false, ms(0)));
    }
}
