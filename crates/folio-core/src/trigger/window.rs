//! Trigger window placement

use serde::Serialize;

use crate::layout::{Rect, Viewport};

/// A point on the element meeting a point on the viewport.
///
/// Both values are fractions: `element` 0.0 is the element's top edge and
/// 1.0 its bottom; `viewport` 0.0 is the top of the viewport. `Edge::new(0.0,
/// 0.6)` reads as "element top reaches 60% down the viewport".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub element: f64,
    pub viewport: f64,
}

impl Edge {
    pub const TOP_TOP: Edge = Edge {
        element: 0.0,
        viewport: 0.0,
    };

    pub fn new(element: f64, viewport: f64) -> Self {
        Self { element, viewport }
    }

    /// Scroll position at which this edge is reached
    pub fn resolve(&self, rect: Rect, viewport: Viewport) -> f64 {
        rect.top + rect.height * self.element - viewport.height * self.viewport
    }
}

/// Where a trigger window ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TriggerEnd {
    Edge(Edge),
    /// Fixed scroll distance past the start
    Distance(f64),
}

/// Registration parameters for one trigger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerSpec {
    /// Section id the trigger is bound to
    pub region: String,
    pub start: Edge,
    pub end: TriggerEnd,
}

impl TriggerSpec {
    pub fn new(region: impl Into<String>, start: Edge, end: TriggerEnd) -> Self {
        Self {
            region: region.into(),
            start,
            end,
        }
    }

    /// Measure the window against the region's current box
    pub fn measure(&self, rect: Rect, viewport: Viewport) -> Window {
        let start = self.start.resolve(rect, viewport);
        let end = match self.end {
            TriggerEnd::Edge(edge) => edge.resolve(rect, viewport),
            TriggerEnd::Distance(distance) => start + distance.max(0.0),
        };
        Window {
            start,
            end: end.max(start),
        }
    }
}

/// Where a position lies relative to a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Zone {
    Before,
    Inside,
    After,
}

/// The `[start, end)` scroll range over which a trigger is active
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

impl Window {
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    pub fn zone(&self, position: f64) -> Zone {
        if position < self.start {
            Zone::Before
        } else if position < self.end {
            Zone::Inside
        } else {
            Zone::After
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_resolution() {
        let rect = Rect {
            top: 1000.0,
            height: 500.0,
        };
        let viewport = Viewport::new(1200.0, 800.0);

        assert_eq!(Edge::TOP_TOP.resolve(rect, viewport), 1000.0);
        // "top 60%"
        assert_eq!(Edge::new(0.0, 0.6).resolve(rect, viewport), 520.0);
        // "bottom 60%"
        assert_eq!(Edge::new(1.0, 0.6).resolve(rect, viewport), 1020.0);
    }

    #[test]
    fn test_distance_end() {
        let spec = TriggerSpec::new("projects", Edge::TOP_TOP, TriggerEnd::Distance(2000.0));
        let window = spec.measure(
            Rect {
                top: 800.0,
                height: 800.0,
            },
            Viewport::new(1000.0, 800.0),
        );
        assert_eq!(window, Window { start: 800.0, end: 2800.0 });
    }

    #[test]
    fn test_inverted_end_collapses() {
        let spec = TriggerSpec::new("a", Edge::new(1.0, 0.0), TriggerEnd::Edge(Edge::TOP_TOP));
        let window = spec.measure(
            Rect {
                top: 0.0,
                height: 100.0,
            },
            Viewport::new(100.0, 100.0),
        );
        assert!(window.is_empty());
        assert_eq!(window.zone(100.0), Zone::After);
    }

    #[test]
    fn test_window_is_half_open() {
        let window = Window { start: 10.0, end: 20.0 };
        assert_eq!(window.zone(9.9), Zone::Before);
        assert_eq!(window.zone(10.0), Zone::Inside);
        assert_eq!(window.zone(20.0), Zone::After);
    }
}
