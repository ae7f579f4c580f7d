//! Active navigation link tracking

use tracing::debug;

use crate::config::SpyConfig;
use crate::layout::{NavLink, PageLayout};
use crate::trigger::{Edge, ScrollTriggerRegistry, TriggerEnd, TriggerEvent, TriggerHandle, TriggerSpec};

/// A navigation link bound to the trigger of the section it points at
#[derive(Debug, Clone, PartialEq)]
pub struct SpyLink {
    pub label: String,
    pub href: String,
    pub trigger: TriggerHandle,
}

/// Derives the active link purely from trigger callbacks
#[derive(Debug, Clone, Default)]
pub struct ScrollSpy {
    links: Vec<SpyLink>,
    active: Option<usize>,
}

impl ScrollSpy {
    /// Register one trigger per link whose anchor resolves to a section.
    /// Links to other pages or to missing sections are not tracked.
    pub fn bind(
        nav: &[NavLink],
        layout: &PageLayout,
        registry: &mut ScrollTriggerRegistry,
        config: &SpyConfig,
    ) -> Self {
        let links = nav
            .iter()
            .filter_map(|link| {
                let id = link.anchor().filter(|id| layout.has_section(id))?;
                let trigger = registry.create_trigger(TriggerSpec::new(
                    id,
                    Edge::new(0.0, config.start_viewport_ratio),
                    TriggerEnd::Edge(Edge::new(1.0, config.end_viewport_ratio)),
                ));
                Some(SpyLink {
                    label: link.label.clone(),
                    href: link.href.clone(),
                    trigger,
                })
            })
            .collect();

        Self { links, active: None }
    }

    pub fn links(&self) -> &[SpyLink] {
        &self.links
    }

    pub fn active_link(&self) -> Option<&SpyLink> {
        self.active.and_then(|i| self.links.get(i))
    }

    pub fn active_href(&self) -> Option<&str> {
        self.active_link().map(|l| l.href.as_str())
    }

    /// React to one trigger callback; returns true when the active link changed
    pub fn handle(&mut self, event: TriggerEvent) -> bool {
        let Some(index) = self.links.iter().position(|l| l.trigger == event.handle) else {
            return false;
        };

        let next = if event.kind.is_enter() {
            Some(index)
        } else if self.active == Some(index) {
            None
        } else {
            self.active
        };

        if next == self.active {
            return false;
        }
        self.active = next;
        debug!(active = ?self.active_href(), "active link changed");
        true
    }
}
