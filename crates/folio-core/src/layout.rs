//! Page layout model
//!
//! Stands in for the document: an ordered list of sections, the navigation
//! links pointing at them, and the viewport. [`PageLayout::measure`] turns it
//! into absolute [`Geometry`] for a given pin spacer height.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1440.0, 900.0)
    }
}

/// Horizontal track inside the pinned section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinTrack {
    /// Full scroll width of the track
    pub track_width: f64,
    pub panel_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<PinTrack>,
}

impl Section {
    pub fn new(id: impl Into<String>, height: f64) -> Self {
        Self {
            id: id.into(),
            height,
            pin: None,
        }
    }

    pub fn pinned(id: impl Into<String>, height: f64, track_width: f64, panel_count: usize) -> Self {
        Self {
            id: id.into(),
            height,
            pin: Some(PinTrack {
                track_width,
                panel_count,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    /// In-page anchor, e.g. `#contact`
    pub href: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }

    /// Section id this link points at, if it is an in-page anchor
    pub fn anchor(&self) -> Option<&str> {
        anchor_id(&self.href)
    }
}

/// Strip the leading `#` of an in-page anchor
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default)]
    pub viewport: Viewport,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub nav: Vec<NavLink>,
}

impl PageLayout {
    /// The portfolio page the engine was built for
    pub fn portfolio() -> Self {
        Self {
            viewport: Viewport::default(),
            sections: vec![
                Section::new("home", 900.0),
                Section::new("about", 1100.0),
                Section::pinned("projects", 900.0, 4320.0, 3),
                Section::new("achievements", 1000.0),
                Section::new("contact", 900.0),
                Section::new("footer", 400.0),
            ],
            nav: vec![
                NavLink::new("Home", "#home"),
                NavLink::new("About", "#about"),
                NavLink::new("Projects", "#projects"),
                NavLink::new("Contact", "#contact"),
            ],
        }
    }

    /// Load a layout from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let layout: Self =
            toml::from_str(content).map_err(|e| crate::Error::Layout(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Reject layouts the engine cannot measure
    pub fn validate(&self) -> crate::Result<()> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.is_empty() {
                return Err(crate::Error::Layout("section with empty id".into()));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(crate::Error::Layout(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
            if !section.height.is_finite() || section.height < 0.0 {
                return Err(crate::Error::Layout(format!(
                    "section '{}' has invalid height {}",
                    section.id, section.height
                )));
            }
            if let Some(track) = section.pin {
                if !track.track_width.is_finite() || track.track_width < 0.0 {
                    return Err(crate::Error::Layout(format!(
                        "section '{}' has invalid track width {}",
                        section.id, track.track_width
                    )));
                }
            }
        }

        let pinned = self.sections.iter().filter(|s| s.pin.is_some()).count();
        if pinned > 1 {
            return Err(crate::Error::Layout(format!(
                "{} pinned sections, at most one is supported",
                pinned
            )));
        }

        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.viewport.width) || !positive(self.viewport.height) {
            return Err(crate::Error::Layout("viewport must have a positive size".into()));
        }

        Ok(())
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.section(id).is_some()
    }

    /// The pinned section and its track
    pub fn pin_section(&self) -> Option<(&Section, PinTrack)> {
        self.sections
            .iter()
            .find_map(|s| s.pin.map(|track| (s, track)))
    }

    pub fn remove_section(&mut self, id: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.id != id);
        self.sections.len() != before
    }

    pub fn resize_section(&mut self, id: &str, height: f64) -> bool {
        match self.sections.iter_mut().find(|s| s.id == id) {
            Some(section) => {
                section.height = height.max(0.0);
                true
            }
            None => false,
        }
    }

    /// Lay sections out top to bottom
    ///
    /// `pin_spacing` is the extra flow height the pinned section occupies
    /// while pinned; every section after it moves down by that amount.
    pub fn measure(&self, pin_spacing: f64) -> Geometry {
        let mut top = 0.0;
        let mut rects = Vec::with_capacity(self.sections.len());

        for section in &self.sections {
            let mut height = section.height;
            if section.pin.is_some() {
                height += pin_spacing.max(0.0);
            }
            rects.push((section.id.clone(), Rect { top, height }));
            top += height;
        }

        Geometry {
            rects,
            document_height: top,
        }
    }
}

/// Absolute box of a section in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Measured layout, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Geometry {
    rects: Vec<(String, Rect)>,
    document_height: f64,
}

impl Geometry {
    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.rects.iter().find(|(rid, _)| rid == id).map(|(_, r)| *r)
    }

    pub fn rects(&self) -> impl Iterator<Item = (&str, Rect)> {
        self.rects.iter().map(|(id, r)| (id.as_str(), *r))
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    /// Largest reachable scroll position for this viewport
    pub fn max_scroll(&self, viewport: Viewport) -> f64 {
        (self.document_height - viewport.height).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_stacks_sections() {
        let layout = PageLayout::portfolio();
        let geometry = layout.measure(0.0);

        assert_eq!(geometry.rect("home").unwrap().top, 0.0);
        assert_eq!(geometry.rect("about").unwrap().top, 900.0);
        assert_eq!(geometry.rect("projects").unwrap().top, 2000.0);
        assert_eq!(geometry.document_height(), 5200.0);
        assert!(geometry.rect("missing").is_none());
    }

    #[test]
    fn test_pin_spacing_shifts_later_sections() {
        let layout = PageLayout::portfolio();
        let flat = layout.measure(0.0);
        let pinned = layout.measure(2880.0);

        assert_eq!(pinned.rect("about"), flat.rect("about"));
        assert_eq!(pinned.rect("projects").unwrap().height, 900.0 + 2880.0);
        assert_eq!(
            pinned.rect("contact").unwrap().top,
            flat.rect("contact").unwrap().top + 2880.0
        );
        assert_eq!(pinned.max_scroll(Viewport::new(1440.0, 900.0)), 5200.0 + 2880.0 - 900.0);
    }

    #[test]
    fn test_anchor_id() {
        assert_eq!(anchor_id("#contact"), Some("contact"));
        assert_eq!(anchor_id("#"), None);
        assert_eq!(anchor_id("contact"), None);
        assert_eq!(NavLink::new("Home", "#home").anchor(), Some("home"));
    }

    #[test]
    fn test_validate_rejects_duplicates_and_double_pins() {
        let mut layout = PageLayout::portfolio();
        layout.sections.push(Section::new("home", 10.0));
        assert!(matches!(layout.validate(), Err(crate::Error::Layout(_))));

        let mut layout = PageLayout::portfolio();
        layout.sections.push(Section::pinned("gallery", 500.0, 2000.0, 2));
        assert!(layout.validate().is_err());

        let mut layout = PageLayout::portfolio();
        layout.sections[0].height = -1.0;
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_sizes() {
        let mut layout = PageLayout::portfolio();
        layout.viewport = Viewport::new(f64::NAN, 800.0);
        assert!(layout.validate().is_err());

        let mut layout = PageLayout::portfolio();
        layout.viewport = Viewport::new(1200.0, f64::INFINITY);
        assert!(layout.validate().is_err());

        for width in [f64::NAN, -100.0] {
            let mut layout = PageLayout::portfolio();
            layout.sections.push(Section::pinned("gallery", 500.0, width, 2));
            layout.sections.retain(|s| s.id == "gallery" || s.pin.is_none());
            assert!(
                matches!(layout.validate(), Err(crate::Error::Layout(msg)) if msg.contains("track width")),
                "track width {} accepted",
                width
            );
        }

        assert!(PageLayout::portfolio().validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let layout = PageLayout::from_toml(
            r##"
            [viewport]
            width = 1000.0
            height = 800.0

            [[sections]]
            id = "home"
            height = 800.0

            [[sections]]
            id = "projects"
            height = 800.0
            pin = { track_width = 3000.0, panel_count = 3 }

            [[nav]]
            label = "Home"
            href = "#home"
            "##,
        )
        .unwrap();

        assert_eq!(layout.viewport, Viewport::new(1000.0, 800.0));
        let (section, track) = layout.pin_section().unwrap();
        assert_eq!(section.id, "projects");
        assert_eq!(track.panel_count, 3);
        assert_eq!(layout.nav.len(), 1);
    }

    #[test]
    fn test_remove_and_resize_section() {
        let mut layout = PageLayout::portfolio();
        assert!(layout.resize_section("about", 500.0));
        assert_eq!(layout.measure(0.0).rect("projects").unwrap().top, 1400.0);

        assert!(layout.remove_section("about"));
        assert!(!layout.remove_section("about"));
        assert!(!layout.has_section("about"));
    }
}
