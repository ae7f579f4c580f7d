//! In-page anchor navigation
//!
//! Resolves an anchor to its section and asks the scroll controller to go
//! there. A jump that lands past an active pin region first takes the region
//! out of service so the pinned range does not fight the animation, then
//! brings it back once the scroll has ended and the layout had time to
//! settle.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::NavigationConfig;
use crate::error::Degradation;
use crate::layout::Geometry;
use crate::pin::HorizontalPinRegion;
use crate::scroll::{ScrollId, ScrollOutcome, ScrollToOptions, SmoothScrollController};
use crate::trigger::ScrollTriggerRegistry;

/// Everything a navigation touches, borrowed for the duration of one call
pub struct NavContext<'a> {
    pub geometry: &'a Geometry,
    pub controller: &'a mut SmoothScrollController,
    pub registry: &'a mut ScrollTriggerRegistry,
    pub pin: Option<&'a mut HorizontalPinRegion>,
}

/// What `navigate_to` did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavOutcome {
    /// No section with that id; nothing happened
    MissingTarget { anchor: String },
    Direct { target: f64, scroll: ScrollId },
    /// The pin region was suspended before scrolling
    AcrossPin { target: f64, scroll: ScrollId },
}

impl NavOutcome {
    pub fn scroll(&self) -> Option<ScrollId> {
        match self {
            Self::MissingTarget { .. } => None,
            Self::Direct { scroll, .. } | Self::AcrossPin { scroll, .. } => Some(*scroll),
        }
    }
}

#[derive(Debug, Clone)]
struct PendingNav {
    scroll: ScrollId,
    target: String,
    /// The pin region must come back once this scroll ends
    resume_pin: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationRouter {
    config: NavigationConfig,
    pending: Option<PendingNav>,
    /// When the suspended pin region is due back in service
    resume_at: Option<Duration>,
}

impl NavigationRouter {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            pending: None,
            resume_at: None,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// A navigation scroll is in flight or the pin region awaits resumption
    pub fn is_navigating(&self) -> bool {
        self.pending.is_some() || self.resume_at.is_some()
    }

    /// Section id of the navigation in flight
    pub fn pending_target(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.target.as_str())
    }

    pub fn resume_at(&self) -> Option<Duration> {
        self.resume_at
    }

    /// Scroll to the section named by `anchor` (`#id` or bare `id`)
    ///
    /// A second call while the first is still running replaces it; the
    /// controller reports the first as cancelled. An obligation to resume
    /// the pin region carries over to the replacing navigation.
    pub fn navigate_to(&mut self, anchor: &str, ctx: NavContext<'_>) -> NavOutcome {
        let id = anchor.strip_prefix('#').unwrap_or(anchor);

        let Some(rect) = ctx.geometry.rect(id) else {
            debug!("{}", Degradation::MissingTarget(id.to_string()));
            return NavOutcome::MissingTarget {
                anchor: id.to_string(),
            };
        };

        let mut resume_pin = self.resume_at.take().is_some()
            || self.pending.as_ref().is_some_and(|p| p.resume_pin);

        let mut across_pin = false;
        if let Some(pin) = ctx.pin {
            let past_pin = ctx
                .geometry
                .rect(pin.region())
                .is_some_and(|pin_rect| rect.top > pin_rect.top);

            if past_pin && pin.is_pinning() {
                pin.disable(false);
                ctx.registry.set_enabled(pin.trigger(), false);
                resume_pin = true;
                across_pin = true;
            }
        }

        let scroll = ctx
            .controller
            .scroll_to(rect.top, ScrollToOptions::from(&self.config));
        info!(anchor = id, position = rect.top, across_pin, "navigating");

        self.pending = Some(PendingNav {
            scroll,
            target: id.to_string(),
            resume_pin,
        });

        if across_pin {
            NavOutcome::AcrossPin {
                target: rect.top,
                scroll,
            }
        } else {
            NavOutcome::Direct {
                target: rect.top,
                scroll,
            }
        }
    }

    /// Follow the navigation target when the layout moved under it
    pub fn retarget(&self, geometry: &Geometry, controller: &mut SmoothScrollController) {
        let Some(pending) = self.pending.as_ref() else {
            return;
        };
        if let Some(rect) = geometry.rect(&pending.target) {
            controller.retarget(pending.scroll, rect.top + self.config.offset_px);
        }
    }

    /// Feed back a finished scroll request
    ///
    /// Only the navigation's own request matters. Cancellation by user input
    /// still schedules the resume, since nothing else would.
    pub fn on_scroll_finished(&mut self, id: ScrollId, outcome: ScrollOutcome, now: Duration) {
        if self.pending.as_ref().map(|p| p.scroll) != Some(id) {
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };
        debug!(anchor = %pending.target, ?outcome, "navigation finished");

        if pending.resume_pin {
            self.resume_at = Some(now + Duration::from_millis(self.config.settle_delay_ms));
        }
    }

    /// Bring the pin region back once the settle delay has passed
    ///
    /// Returns true when the region was resumed; the caller must then
    /// recompute geometry before the next evaluation. A region reset by a
    /// resize in the meantime has nothing to resume.
    pub fn poll(
        &mut self,
        now: Duration,
        pin: Option<&mut HorizontalPinRegion>,
        registry: &mut ScrollTriggerRegistry,
    ) -> bool {
        match self.resume_at {
            Some(at) if now >= at => {}
            _ => return false,
        }
        self.resume_at = None;

        let Some(pin) = pin else {
            return false;
        };
        let resumed = pin.enable();
        registry.set_enabled(pin.trigger(), pin.is_pinning());
        if resumed {
            debug!("pin region back in service after settle delay");
        }
        resumed
    }
}
