//! Trigger registration table

use serde::Serialize;
use tracing::{debug, warn};

use super::window::{TriggerEnd, TriggerSpec, Window, Zone};
use crate::layout::{Geometry, Viewport};

/// Index of a trigger in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TriggerHandle(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerState {
    Idle,
    Active,
}

/// Which boundary was crossed, and in which direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEventKind {
    /// Crossed the start scrolling down
    Enter,
    /// Crossed the end scrolling down
    Leave,
    /// Crossed the end scrolling up
    EnterBack,
    /// Crossed the start scrolling up
    LeaveBack,
}

impl TriggerEventKind {
    pub fn is_enter(&self) -> bool {
        matches!(self, Self::Enter | Self::EnterBack)
    }

    /// Window boundary this callback crosses
    pub fn boundary(&self, window: Window) -> f64 {
        match self {
            Self::Enter | Self::LeaveBack => window.start,
            Self::Leave | Self::EnterBack => window.end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriggerEvent {
    pub handle: TriggerHandle,
    pub kind: TriggerEventKind,
}

#[derive(Debug, Clone)]
struct Trigger {
    spec: TriggerSpec,
    window: Option<Window>,
    /// `None` re-seeds from the next position without firing
    zone: Option<Zone>,
    enabled: bool,
    /// Region left the document; the trigger stays inactive for good
    detached: bool,
}

/// Callbacks a zone change fires, in order
fn crossings(from: Zone, to: Zone) -> &'static [TriggerEventKind] {
    use TriggerEventKind::*;
    match (from, to) {
        (Zone::Before, Zone::Inside) => &[Enter],
        (Zone::Before, Zone::After) => &[Enter, Leave],
        (Zone::Inside, Zone::After) => &[Leave],
        (Zone::Inside, Zone::Before) => &[LeaveBack],
        (Zone::After, Zone::Inside) => &[EnterBack],
        (Zone::After, Zone::Before) => &[EnterBack, LeaveBack],
        _ => &[],
    }
}

/// Owns every trigger on the page
///
/// Windows are absolute scroll coordinates, so `recompute_all` must run after
/// anything that moves sections. `update` compares each window with the
/// latest position and returns the callbacks that fire, ordered along the
/// scroll direction so the window reached last reports last.
#[derive(Debug, Clone, Default)]
pub struct ScrollTriggerRegistry {
    triggers: Vec<Trigger>,
    last_position: Option<f64>,
}

impl ScrollTriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger; its window is measured on the next `recompute_all`
    pub fn create_trigger(&mut self, spec: TriggerSpec) -> TriggerHandle {
        let handle = TriggerHandle(self.triggers.len());
        debug!(?handle, region = %spec.region, "trigger registered");
        self.triggers.push(Trigger {
            spec,
            window: None,
            zone: Some(Zone::Before),
            enabled: true,
            detached: false,
        });
        handle
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn region(&self, handle: TriggerHandle) -> Option<&str> {
        self.triggers.get(handle.0).map(|t| t.spec.region.as_str())
    }

    /// Stop or resume firing callbacks without dropping the registration.
    ///
    /// A re-enabled trigger adopts the zone of the next position silently,
    /// so crossings made while disabled are never replayed.
    pub fn set_enabled(&mut self, handle: TriggerHandle, enabled: bool) -> bool {
        let Some(trigger) = self.triggers.get_mut(handle.0) else {
            return false;
        };
        if trigger.enabled != enabled {
            trigger.enabled = enabled;
            trigger.zone = None;
            debug!(?handle, enabled, "trigger toggled");
        }
        true
    }

    pub fn is_enabled(&self, handle: TriggerHandle) -> bool {
        self.triggers.get(handle.0).is_some_and(|t| t.enabled)
    }

    /// Replace the end of a trigger whose extent depends on other state
    pub fn set_end(&mut self, handle: TriggerHandle, end: TriggerEnd) {
        if let Some(trigger) = self.triggers.get_mut(handle.0) {
            trigger.spec.end = end;
        }
    }

    pub fn state(&self, handle: TriggerHandle) -> TriggerState {
        match self.triggers.get(handle.0) {
            Some(t) if t.enabled && !t.detached && t.zone == Some(Zone::Inside) => {
                TriggerState::Active
            }
            _ => TriggerState::Idle,
        }
    }

    /// Last measured window; `None` before measurement or once detached
    pub fn window(&self, handle: TriggerHandle) -> Option<Window> {
        self.triggers.get(handle.0).and_then(|t| t.window)
    }

    pub fn windows(&self) -> Vec<(TriggerHandle, Option<Window>)> {
        self.triggers
            .iter()
            .enumerate()
            .map(|(i, t)| (TriggerHandle(i), t.window))
            .collect()
    }

    /// Re-measure every window against fresh geometry.
    ///
    /// Pure in `geometry` and `viewport`: calling it twice without a layout
    /// change in between yields the same windows. Triggers whose region is
    /// gone lose their window permanently.
    pub fn recompute_all(&mut self, geometry: &Geometry, viewport: Viewport) {
        for (i, trigger) in self.triggers.iter_mut().enumerate() {
            if trigger.detached {
                continue;
            }
            match geometry.rect(&trigger.spec.region) {
                Some(rect) => {
                    trigger.window = Some(trigger.spec.measure(rect, viewport));
                }
                None => {
                    warn!(
                        handle = i,
                        region = %trigger.spec.region,
                        "trigger region left the document, deactivating"
                    );
                    trigger.window = None;
                    trigger.detached = true;
                }
            }
        }
    }

    /// Evaluate every enabled trigger at `position`
    ///
    /// Callbacks are ordered by the boundary each one crossed, along the
    /// direction of travel. At a shared boundary exits come before entries,
    /// so whatever is entered last is what the position now lies in.
    pub fn update(&mut self, position: f64) -> Vec<TriggerEvent> {
        let upward = self.last_position.is_some_and(|last| position < last);
        self.last_position = Some(position);

        // Detached triggers have no boundary left; their exits go first
        let mut events = Vec::new();
        let mut crossed: Vec<Crossing> = Vec::new();

        for (i, trigger) in self.triggers.iter_mut().enumerate() {
            if !trigger.enabled {
                continue;
            }
            let handle = TriggerHandle(i);

            let Some(window) = trigger.window.filter(|_| !trigger.detached) else {
                if trigger.zone == Some(Zone::Inside) {
                    events.push(TriggerEvent {
                        handle,
                        kind: TriggerEventKind::Leave,
                    });
                }
                if trigger.detached {
                    trigger.zone = Some(Zone::Before);
                }
                continue;
            };

            let next = window.zone(position);
            if let Some(previous) = trigger.zone {
                let kinds = crossings(previous, next);
                // A pass through an empty window keeps its own order
                let pass_through = kinds.len() == 2 && window.is_empty();
                for &kind in kinds {
                    debug!(?handle, ?kind, position, "trigger fired");
                    crossed.push(Crossing {
                        at: kind.boundary(window),
                        exit_first: !kind.is_enter() || pass_through,
                        seq: crossed.len(),
                        event: TriggerEvent { handle, kind },
                    });
                }
            }
            trigger.zone = Some(next);
        }

        crossed.sort_by(|a, b| {
            let along = if upward {
                b.at.total_cmp(&a.at)
            } else {
                a.at.total_cmp(&b.at)
            };
            along
                .then(b.exit_first.cmp(&a.exit_first))
                .then(a.seq.cmp(&b.seq))
        });
        events.extend(crossed.into_iter().map(|c| c.event));
        events
    }
}

/// One fired callback and the scroll position of the boundary behind it
#[derive(Debug, Clone, Copy)]
struct Crossing {
    at: f64,
    exit_first: bool,
    seq: usize,
    event: TriggerEvent,
}
